use std::process;

use shapeforge::cli::{build_cli, handlers};

fn main() {
    let matches = build_cli().get_matches();

    let default_level = if matches.get_flag("verbose") {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = handlers::dispatch(&matches) {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Error: {err:#}");
        }

        let code = err
            .downcast_ref::<shapeforge_core::Error>()
            .map_or(1, shapeforge_core::Error::exit_code);

        #[allow(clippy::exit)]
        process::exit(code);
    }
}
