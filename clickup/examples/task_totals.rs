use clickup::{ClickUpClient, ClientSettings};
use std::collections::HashMap;
use std::error::Error;

const LOOKBACK_DAYS: i64 = 30;

struct TaskInfo {
    task_name: String,
    millis: i64,
    entries: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let client = ClickUpClient::new(ClientSettings::from_env());

    let end = chrono::Utc::now();
    let start = end - chrono::Duration::days(LOOKBACK_DAYS);
    let entries = client
        .time_entries(start.timestamp_millis(), end.timestamp_millis())
        .await?;

    // Sum tracked time per task
    let mut task_times: HashMap<String, TaskInfo> = HashMap::new();
    for entry in &entries {
        let Some(task_id) = entry.task_id() else {
            continue;
        };
        let millis = entry.duration.as_millis().saturating_abs();
        task_times
            .entry(task_id.to_string())
            .and_modify(|info| {
                info.millis += millis;
                info.entries += 1;
            })
            .or_insert(TaskInfo {
                task_name: entry.task_name().unwrap_or("(unnamed)").to_string(),
                millis,
                entries: 1,
            });
    }

    let mut tasks: Vec<_> = task_times.into_iter().collect();
    tasks.sort_by(|a, b| b.1.millis.cmp(&a.1.millis));

    println!("Tracked time per task, last {} days:", LOOKBACK_DAYS);
    for (task_id, info) in tasks {
        println!(
            "{} [{}] ({}) | {} entries",
            info.task_name,
            task_id,
            format_hours_minutes(info.millis),
            info.entries
        );
    }

    Ok(())
}

fn format_hours_minutes(millis: i64) -> String {
    let total_minutes = millis / 60_000;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    format!("{hours:02}:{minutes:02}")
}
