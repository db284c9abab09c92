use vanity::{config, err, opt, routes, table};

#[tokio::main]
async fn main() -> Result<(), err::DisplayError> {
    let options: opt::Options = clap::Parser::parse();

    env_logger::Builder::new()
        .filter_level(match options.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    let config = config::Config::from_options(options)?;
    for mapping in config.mappings.iter() {
        let table::Destination {
            vcs,
            scheme,
            hostname,
        } = &mapping.destination;
        log::info!(
            "Mapping {:?} -> {} {}://{}",
            mapping.mapper.pattern(),
            vcs,
            scheme,
            hostname
        );
    }

    let addr = config.listen_addr();
    let state = routes::State::from(config);
    vanity::http::run_simple_server(addr, state, routes::respond_to_request).await?;

    Ok(())
}
