use command_hub::dashboard::{DashboardSession, JsonFilePersistence, WidgetRegistry};
use command_hub::logging;
use command_hub::settings::Settings;

fn main() -> anyhow::Result<()> {
    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "settings.json".into());
    let settings = Settings::load(&settings_path)?;
    logging::init(settings.debug_logging, settings.log_path());

    let store = JsonFilePersistence::new(settings.dashboard_file());
    let mut session = DashboardSession::new(WidgetRegistry::with_defaults(), settings.columns)
        .with_persistence(store);

    match session.load_saved()? {
        Some(warnings) if !warnings.is_empty() => {
            tracing::warn!(dropped = warnings.len(), "saved layout was repaired");
        }
        Some(_) => {}
        None if settings.seed_default_layout => {
            session.seed_default_layout();
            if let Err(e) = session.save_layout() {
                tracing::warn!(error = %e, "default layout not saved");
            }
        }
        None => {}
    }

    if session.is_empty() {
        println!("No widgets active. Add widgets to customize your command hub.");
        return Ok(());
    }

    print_grid(&session);
    for (instance, lines) in session.render() {
        println!();
        println!(
            "== {} at ({}, {}) ==",
            instance.kind, instance.position.x, instance.position.y
        );
        for line in lines {
            println!("   {line}");
        }
    }
    Ok(())
}

/// Rows printed by the grid preview.
const PREVIEW_ROWS: usize = 24;

fn print_grid(session: &DashboardSession) {
    let layout = session.layout();
    let label = |id: &str| {
        layout
            .instances()
            .iter()
            .position(|i| i.id == id)
            .map(|n| (b'A' + (n % 26) as u8) as char)
            .unwrap_or('?')
    };
    for row in layout.grid_rows(0..PREVIEW_ROWS) {
        let line: String = row
            .iter()
            .map(|cell| match cell {
                Some(inst) => format!("[{}]", label(&inst.id)),
                None => "[ ]".to_string(),
            })
            .collect();
        println!("{line}");
    }
    if layout.rows() > PREVIEW_ROWS {
        println!("... {} more rows", layout.rows() - PREVIEW_ROWS);
    }
    for (n, inst) in layout.instances().iter().enumerate() {
        println!("{} = {}", (b'A' + (n % 26) as u8) as char, inst.kind);
    }
}
