use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use notification_buffer::config::{AppConfig, CliConfig, FileConfig};
use notification_buffer::notifications::{load_records, PanelView, DEFAULT_DATE_FORMAT};
use notification_buffer::{NotificationHub, DEFAULT_CAPACITY};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a JSON array with the initial notifications.
    #[clap(value_parser = parse_path)]
    pub records: PathBuf,

    /// Path to a TOML config file. Its values override the flags below.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Maximum number of notifications kept.
    #[clap(long, default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Offset from UTC, in minutes, used to pick each notification's day.
    #[clap(long, default_value_t = 0, allow_hyphen_values = true)]
    pub utc_offset_minutes: i32,

    /// strftime pattern for day group labels.
    #[clap(long, default_value = DEFAULT_DATE_FORMAT)]
    pub date_format: String,

    /// JSON files with notifications to add after loading, applied in order.
    #[clap(long = "add", value_parser = parse_path)]
    pub add: Vec<PathBuf>,

    /// Notification ids to mark as read.
    #[clap(long = "mark-read")]
    pub mark_read: Vec<String>,

    /// Mark every notification as read.
    #[clap(long)]
    pub mark_all_read: bool,

    /// Unread count to display instead of the derived one.
    #[clap(long)]
    pub unread_count_override: Option<usize>,

    /// Print the panel as JSON.
    #[clap(long)]
    pub json: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            capacity: self.capacity,
            utc_offset_minutes: self.utc_offset_minutes,
            date_format: self.date_format.clone(),
            unread_count_override: self.unread_count_override,
        }
    }
}

fn print_panel(view: &PanelView) {
    println!("Notifications ({} unread)", view.unread_count);
    if view.all_caught_up {
        println!("You're all caught up!");
        return;
    }
    for group in &view.groups {
        println!();
        println!("{}", group.label);
        for record in &group.members {
            let marker = if record.unread { "*" } else { " " };
            let category = record.category.as_str();
            if record.subtitle.is_empty() {
                println!("  {} [{}] {} ({})", marker, category, record.title, record.id);
            } else {
                println!(
                    "  {} [{}] {} - {} ({})",
                    marker, category, record.title, record.subtitle, record.id
                );
            }
        }
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;
    let labeler = config.day_labeler()?;

    info!("Loading notifications from {:?}...", cli_args.records);
    let initial = load_records(&cli_args.records)?;
    let hub = NotificationHub::new(initial, config.capacity)?;
    hub.set_unread_count_override(config.unread_count_override);
    hub.on_all_read(|records| {
        info!("All {} notifications marked as read", records.len());
    });

    for path in &cli_args.add {
        let batch = load_records(path)?;
        info!("Adding {} notifications from {:?}", batch.len(), path);
        hub.push_batch(batch);
    }

    for id in &cli_args.mark_read {
        if !hub.mark_read(id) {
            warn!("No unread notification with id {}", id);
        }
    }

    if cli_args.mark_all_read {
        hub.mark_all_read();
    }

    let view = hub.panel_view(|timestamp| labeler.label(timestamp));
    if cli_args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_panel(&view);
    }

    Ok(())
}
