//! Interactive command-line host for the texture inbox core.
//!
//! Runs the whole pipeline on one thread: commands mutate state through the
//! operator surface, and `run` drives the cooperative poll loop, pausing for
//! an accept/discard decision whenever a candidate is staged.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;

use texture_inbox::{App, ManualTimer, NullRenderHost, ProjectPaths, StateStore, WatchPrefs};

type CliApp = App<NullRenderHost, ManualTimer>;

fn parse_args() -> (ProjectPaths, WatchPrefs) {
    let mut project_root: Option<PathBuf> = None;
    let mut watch_folder: Option<PathBuf> = None;

    let mut args = std::env::args_os().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--watch" {
            watch_folder = args.next().map(PathBuf::from);
        } else if project_root.is_none() {
            project_root = Some(PathBuf::from(arg));
        }
    }

    let paths = match project_root {
        Some(root) => ProjectPaths::new(root),
        None => ProjectPaths::unsaved(),
    };
    let prefs = WatchPrefs {
        enabled: watch_folder.is_some(),
        folder: watch_folder,
    };
    (paths, prefs)
}

fn print_status(app: &CliApp) {
    let state = app.state();
    println!("objects:");
    for name in &state.objects {
        let marker = if state.selected_object() == Some(name.as_str()) {
            "*"
        } else {
            " "
        };
        let mode = if state.use_default_texture(name) {
            "default"
        } else {
            "imported"
        };
        println!("  {} {} [{}]", marker, name, mode);
    }
    println!(
        "watch folder: {} ({})",
        app.prefs()
            .folder
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "unset".to_string()),
        if app.prefs().enabled { "enabled" } else { "disabled" },
    );
    println!(
        "auto refresh: {} every {}s",
        state.auto_refresh, state.refresh_interval
    );
    match app.review_candidate() {
        Some((path, owner)) => println!(
            "review pending: {} (for {})",
            path.display(),
            owner.unwrap_or("?")
        ),
        None => println!("review idle"),
    }
}

fn prompt_review(app: &mut CliApp, input: &mut impl BufRead) -> io::Result<()> {
    let Some((path, owner)) = app.review_candidate() else {
        return Ok(());
    };
    println!(
        "new texture for {}: {}",
        owner.unwrap_or("?"),
        path.display()
    );
    loop {
        print!("accept/discard> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        match line.trim() {
            "accept" | "a" => {
                match app.accept() {
                    Some(applied) => println!("committed {}", applied.path.display()),
                    None => println!("accept skipped (see log)"),
                }
                return Ok(());
            }
            "discard" | "d" => {
                app.discard();
                println!("discarded");
                return Ok(());
            }
            other => println!("unknown answer '{}', type accept or discard", other),
        }
    }
}

/// Cooperative poll loop: tick, sleep for the returned interval, repeat.
/// Breaks to the review prompt whenever a candidate is staged, and exits
/// once auto-refresh stops re-arming.
fn run_poll_loop(app: &mut CliApp, input: &mut impl BufRead) -> io::Result<()> {
    if !app.state().auto_refresh {
        app.set_auto_refresh(true);
    }
    println!("polling (Ctrl-C to abort)...");
    while let Some(interval) = app.on_refresh_tick() {
        if app.is_review_pending() {
            prompt_review(app, input)?;
            continue;
        }
        thread::sleep(interval);
    }
    println!("auto refresh disabled, stopping");
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  add NAME        register an object");
    println!("  remove NAME     unregister an object");
    println!("  select NAME     route new textures to an object");
    println!("  toggle NAME     flip between default and imported texture");
    println!("  watch DIR       set the watch folder");
    println!("  enable|disable  switch the watch-folder feature");
    println!("  auto on|off     switch auto refresh");
    println!("  interval N      poll interval in seconds (1-60)");
    println!("  refresh         scan the watch folder once");
    println!("  run             poll until stopped, reviewing as files arrive");
    println!("  accept|discard  decide on the pending texture");
    println!("  reset [NAME]    restore default look (all objects when omitted)");
    println!("  status          show current state");
    println!("  save|load       write/read the state document explicitly");
    println!("  quit");
}

fn handle_command(app: &mut CliApp, line: &str, input: &mut impl BufRead) -> io::Result<bool> {
    let mut parts = line.splitn(2, ' ');
    let command = parts.next().unwrap_or("");
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match (command, arg) {
        ("add", Some(name)) => {
            if !app.add_object(name) {
                println!("{} is already registered", name);
            }
        }
        ("remove", Some(name)) => {
            if !app.remove_object(name) {
                println!("{} is not registered", name);
            }
        }
        ("select", Some(name)) => {
            if !app.select_object(name) {
                println!("{} is not registered", name);
            }
        }
        ("toggle", Some(name)) => {
            let use_default = !app.state().use_default_texture(name);
            if !app.toggle_object_texture(name, use_default) {
                println!("{} is not registered", name);
            }
        }
        ("watch", Some(dir)) => app.set_watch_folder(Some(PathBuf::from(dir))),
        ("enable", None) => app.set_watch_folder_enabled(true),
        ("disable", None) => app.set_watch_folder_enabled(false),
        ("auto", Some("on")) => app.set_auto_refresh(true),
        ("auto", Some("off")) => app.set_auto_refresh(false),
        ("interval", Some(n)) => match n.parse::<u32>() {
            Ok(seconds) => app.set_refresh_interval(seconds),
            Err(_) => println!("interval must be a number of seconds"),
        },
        ("refresh", None) => {
            app.refresh();
            if app.is_review_pending() {
                prompt_review(app, input)?;
            }
        }
        ("run", None) => run_poll_loop(app, input)?,
        ("accept", None) => match app.accept() {
            Some(applied) => println!("committed {}", applied.path.display()),
            None => println!("nothing to accept"),
        },
        ("discard", None) => {
            if !app.discard() {
                println!("nothing to discard");
            }
        }
        ("reset", Some(name)) => {
            if !app.reset_texture(name) {
                println!("{} is not registered", name);
            }
        }
        ("reset", None) => app.reset_all_textures(),
        ("status", None) => print_status(app),
        ("save", None) => app.save_state(),
        ("load", None) => app.reload_state(),
        ("help", None) => print_help(),
        ("quit", None) | ("exit", None) => return Ok(false),
        ("", None) => {}
        _ => println!("unknown command, try 'help'"),
    }
    Ok(true)
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let (paths, prefs) = parse_args();
    if paths.root().is_none() {
        println!("no project directory given, state will not be persisted");
    }

    let store = StateStore::new(paths);
    let mut app = CliApp::new(store, prefs, NullRenderHost, ManualTimer::default());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    print_help();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if !handle_command(&mut app, line.trim(), &mut input)? {
            break;
        }
    }
    Ok(())
}
