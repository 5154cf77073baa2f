use anyhow::Context;
use slimpicker::services::logging::{self, Logger};
use slimpicker::shared::PickerConfig;
use yew::Callback;

/// Inputs on the demo page that get a calendar
const DEMO_INPUTS: [&str; 2] = ["start-date", "end-date"];

fn run(config: &PickerConfig) -> anyhow::Result<()> {
    for id in DEMO_INPUTS {
        let on_select = Callback::from(move |value: String| {
            Logger::info_with_component("demo", &format!("#{} set to {}", id, value));
        });
        let app = slimpicker::attach(id, config.clone(), Some(on_select))
            .with_context(|| format!("failed to attach picker to #{}", id))?;
        // Pickers live as long as the page
        std::mem::forget(app);
    }
    Ok(())
}

fn main() {
    let config = PickerConfig::default();
    // Page-wide level comes from the base config only
    logging::init(config.log_level);
    if let Err(e) = run(&config) {
        Logger::error_with_component("demo", &format!("{:#}", e));
    }
}
