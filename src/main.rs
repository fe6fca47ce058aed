use std::io::{self, BufRead, Write};

use travel_planner::config::PlannerConfig;
use travel_planner::pages::{Route, render_page};
use travel_planner::storage::{FileStore, KeyValueStore, MemoryStore};
use travel_planner::store::{MarkerStore, SyncStatus};
use travel_planner::{session, surface};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let route = std::env::args()
        .nth(1)
        .map(|arg| Route::from_arg(&arg))
        .unwrap_or_default();

    let config = load_config();
    let mut store = MarkerStore::new(
        open_storage(&config),
        config.storage_key.clone(),
        config.edit_policy(),
    );
    store.hydrate();
    log::info!("{} pin(s) ready", store.markers().len());

    if route == Route::Map {
        run_map(&mut store, &config)?;
    } else {
        print!("{}", render_page(route, store.state(), &config));
    }
    Ok(())
}

/// Load settings, writing the defaults out on first run so they can be edited
fn load_config() -> PlannerConfig {
    let config = PlannerConfig::load();
    if PlannerConfig::path().is_some_and(|path| !path.exists()) {
        config.save();
    }
    config
}

fn open_storage(config: &PlannerConfig) -> Box<dyn KeyValueStore> {
    let dir = config.data_dir.clone().or_else(FileStore::default_dir);
    match dir.map(FileStore::open) {
        Some(Ok(store)) => {
            log::debug!("Storing pins in {}", store.dir().display());
            Box::new(store)
        }
        Some(Err(e)) => {
            log::warn!("{e:#}; pins will only last for this session");
            Box::new(MemoryStore::new())
        }
        None => {
            log::warn!("No data directory available; pins will only last for this session");
            Box::new(MemoryStore::new())
        }
    }
}

/// Drive the map page from stdin, one interaction per line
fn run_map<S: KeyValueStore>(store: &mut MarkerStore<S>, config: &PlannerConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!("{}", render_page(Route::Map, store.state(), config));
    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        match surface::parse_line(&line, store.state()) {
            Ok(Some(msg)) => {
                session::handle_msg(store, msg);
                if let SyncStatus::Failed(reason) = store.sync_status() {
                    eprintln!("warning: changes not saved ({reason})");
                }
                print!("{}", render_page(Route::Map, store.state(), config));
            }
            Ok(None) => {}
            Err(e) => eprintln!("{e:#}"),
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }
    writeln!(stdout)?;
    Ok(())
}
