// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::time::Duration;
use toaster::config::{self, Config};
use toaster::session::{Session, SimulatedMotion};
use toaster::{NotificationRequest, ToastType};
use tracing::{error, info, warn};

const HELP: &str = "\
Usage: toaster [OPTIONS] TITLE...

Queues one toast per TITLE and runs them through a simulated surface.

Options:
  --delay <MS>      Auto-dismiss delay for every toast
  --type <TYPE>     default, success, fail or info
  --config <PATH>   Load configuration from PATH
  -h, --help        Print this help
";

struct Args {
    delay: Option<u64>,
    toast_type: ToastType,
    config: Option<PathBuf>,
    titles: Vec<String>,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }
    Ok(Args {
        delay: args.opt_value_from_str("--delay")?,
        toast_type: args
            .opt_value_from_str("--type")?
            .unwrap_or_default(),
        config: args.opt_value_from_str("--config")?,
        titles: args
            .finish()
            .into_iter()
            .filter_map(|s| s.into_string().ok())
            .collect(),
    })
}

fn setup_logging() {
    use tracing_subscriber::prelude::*;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toaster=info".into()),
        )
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Config {
    match path {
        Some(path) => config::load_from_path(path).unwrap_or_else(|err| {
            warn!("Failed to load config from {:?}: {}", path, err);
            Config::default()
        }),
        None => {
            let (config, warning) = config::load();
            if let Some(warning) = warning {
                warn!("Using default config: {}", warning);
            }
            config
        }
    }
}

fn request_for(title: String, args: &Args) -> NotificationRequest {
    let shown = title.clone();
    let hidden = title.clone();
    let mut request = NotificationRequest::new(title)
        .toast_type(args.toast_type)
        .on_did_show(move || info!("shown: {}", shown))
        .on_did_hide(move || info!("hidden: {}", hidden));
    if let Some(ms) = args.delay {
        request = request.delay(Duration::from_millis(ms));
    }
    request
}

async fn run(args: Args, config: Config) -> toaster::error::Result<()> {
    let (session, handle) = Session::with_driver(&config, SimulatedMotion::new)?;
    let running = tokio::task::spawn_local(session.run());

    for title in args.titles.clone() {
        handle.show(request_for(title, &args))?;
    }

    let mut poll = tokio::time::interval(Duration::from_millis(100));
    loop {
        poll.tick().await;
        if let Some(view) = handle.view().await? {
            info!(
                title = %view.title,
                state = ?view.state,
                offset = view.offset,
                opacity = view.opacity,
                "active toast"
            );
        }
        if handle.snapshot().await?.is_empty() {
            break;
        }
    }

    drop(handle);
    let _ = running.await;
    Ok(())
}

fn main() {
    setup_logging();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("toaster: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };
    if args.titles.is_empty() {
        eprint!("{HELP}");
        std::process::exit(2);
    }
    let config = load_config(args.config.as_ref());

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("Failed to start runtime: {}", err);
            std::process::exit(1);
        }
    };
    let local = tokio::task::LocalSet::new();
    if let Err(err) = local.block_on(&runtime, run(args, config)) {
        error!("{}", err);
        std::process::exit(1);
    }
}
