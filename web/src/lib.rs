use clap::Parser;
use wasm_bindgen::prelude::*;

mod app;
mod home;
mod reference;
mod shop;
mod storage;
mod toolshed;
mod utils;
mod widgets;

/// Launch options, read from the page query string, e.g. `?-vv&--seed=42`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let query = window().location().search().unwrap_or_default();
    let (args, arg_error) = match Args::try_parse_from(query.split(['?', '&'])) {
        Ok(args) => (args, None),
        Err(err) => (
            Args {
                verbose: Default::default(),
                seed: None,
            },
            Some(err),
        ),
    };
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    if let Some(err) = arg_error {
        log::warn!("Ignoring launch arguments: {err}");
    }
    log::debug!("seed: {:?}", args.seed);

    let root = document()
        .get_element_by_id("app")
        .expect("Could not find id=\"app\" element");

    log::debug!("App started");
    yew::Renderer::<app::App>::with_root_and_props(root, app::AppProps { seed: args.seed })
        .render();
}
