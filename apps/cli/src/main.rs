mod shell;
mod view;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fsexplorer_settings::{Preferences, PreferencesStore};
use tracing::debug;

use crate::shell::Shell;
use crate::view::ExplorerView;

#[derive(Parser, Debug)]
#[command(
    name = "fsexplorer-cli",
    about = "In-memory file explorer driven by text commands",
    author,
    version
)]
struct Cli {
    /// 偏好設定檔路徑；略過時使用預設值。 / Preferences file (defaults are used when omitted).
    #[arg(long, global = true, value_name = "FILE")]
    preferences: Option<PathBuf>,

    /// 輸出到 stderr 的日誌等級。 / Log level written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 執行互動式指令列（或腳本檔）。 / Run the command shell on stdin or a script file.
    Shell {
        /// 從檔案讀取指令而非標準輸入。 / Read commands from a file instead of stdin.
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,
    },
    /// 印出初始樹狀結構。 / Print the initial tree.
    Tree {
        /// 只顯示名稱符合的節點。 / Only show nodes whose name matches.
        #[arg(long, value_name = "QUERY")]
        filter: Option<String>,
    },
    /// 將目前（已清理的）偏好設定寫入 `--preferences` 檔案。 /
    /// Write the current, sanitized preferences to the `--preferences` file.
    InitPreferences,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.log_level);
    debug!(?cli, "parsed arguments");

    let preferences = load_preferences(cli.preferences.as_ref())?;

    match cli.command {
        Commands::Shell { script } => {
            let mut shell = Shell::new(preferences.preferences().clone());
            let stdout = io::stdout();
            let mut out = stdout.lock();
            match script {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("failed to open script {}", path.display()))?;
                    shell.run(BufReader::new(file), &mut out)
                }
                None => shell.run(io::stdin().lock(), &mut out),
            }
        }
        Commands::Tree { filter } => {
            let shell = Shell::new(preferences.preferences().clone());
            let mut view = ExplorerView::default();
            if let Some(query) = filter {
                view.set_filter(query);
            }
            print!("{}", view.render(shell.store().forest()));
            Ok(())
        }
        Commands::InitPreferences => {
            if cli.preferences.is_none() {
                bail!("init-preferences requires --preferences FILE");
            }
            preferences.save()?;
            println!("Wrote preferences to {}", preferences.path().display());
            Ok(())
        }
    }
}

fn load_preferences(path: Option<&PathBuf>) -> Result<PreferencesStore> {
    match path {
        Some(path) => Ok(PreferencesStore::load(path)?),
        None => Ok(PreferencesStore::new(
            "fsexplorer-preferences.json",
            Preferences::default(),
        )),
    }
}

fn setup_tracing(level: LogLevel) {
    if let Some(level) = level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .without_time()
            .compact()
            .with_writer(io::stderr)
            .init();
    }
}
