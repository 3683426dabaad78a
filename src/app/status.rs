use crate::config::Config;
use crate::journal::{Collection, Journal};

pub fn render_status(config: &Config, journal: &Journal) -> String {
    let store = journal.store();
    let history = journal.history(None);
    let tasks = journal.tasks().list();
    let open_tasks = tasks.iter().filter(|task| !task.done).count();
    let current = journal.checkins().current();

    let checkin_line = match current.meta.checkin_id {
        Some(id) => format!("{id} ({})", current.meta.status),
        None => "none".to_string(),
    };

    let mut lines = vec![
        "◆ Wellness Companion".to_string(),
        String::new(),
        format!("Version     {}", env!("CARGO_PKG_VERSION")),
        format!("Config      {}", config.config_path.display()),
        format!("Storage     {}", store.root().display()),
        format!("Log level   {}", config.log_level),
        String::new(),
        format!(
            "History     {} entries ({})",
            history.len(),
            store.collection_path(Collection::History).display()
        ),
        format!(
            "Tasks       {} total, {open_tasks} open ({})",
            tasks.len(),
            store.collection_path(Collection::Tasks).display()
        ),
        format!("Check-in    {checkin_line}"),
    ];

    if let Some(last) = history.last() {
        lines.push(format!("Last entry  {}", last.timestamp));
    }

    lines.join("\n")
}
