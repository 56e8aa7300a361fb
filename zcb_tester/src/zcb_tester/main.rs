//!
//! The ZCB tester executable.
//!

pub(crate) mod arguments;

use std::time::Duration;
use std::time::Instant;

use clap::Parser;
use colored::Colorize;

use self::arguments::Arguments;

///
/// The application entry point.
///
fn main() {
    let exit_code = match Arguments::try_parse()
        .map_err(|error| anyhow::anyhow!(error))
        .and_then(main_inner)
    {
        Ok(()) => zcb_tester::EXIT_CODE_SUCCESS,
        Err(error) => {
            eprintln!("{error:?}");
            zcb_tester::EXIT_CODE_FAILURE
        }
    };
    std::process::exit(exit_code);
}

///
/// The entry point wrapper used for proper error handling.
///
fn main_inner(arguments: Arguments) -> anyhow::Result<()> {
    let arguments = Arguments::validate(arguments)?;
    println!(
        "    {} {} v{}",
        "Starting".bright_green().bold(),
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    let private_keys = arguments.private_keys()?;
    let client = zcb_tester::RpcClient::new(
        arguments.rpc_url.clone(),
        Duration::from_millis(arguments.poll_interval),
    )?;
    let artifacts = zcb_tester::Artifacts::new(arguments.artifacts.clone());

    let setup_time_start = Instant::now();
    println!(
        "   {} `{}` and the tokens to {}",
        "Deploying".bright_green().bold(),
        arguments.issuer_type,
        arguments.rpc_url,
    );
    let context = zcb_tester::ScenarioContext::setup(
        client,
        artifacts,
        arguments.issuer_type,
        private_keys.as_slice(),
        zcb_tester::ScenarioConfig::default(),
    )?;
    println!(
        "    {} the issuer at {} in {}.{:03}s",
        "Deployed".bright_green().bold(),
        zcb_tester::utils::address_as_string(&context.issuer.address()),
        setup_time_start.elapsed().as_secs(),
        setup_time_start.elapsed().subsec_millis(),
    );

    let summary = zcb_tester::Summary::new(arguments.verbose, arguments.quiet).wrap();
    let filters = zcb_tester::Filters::new(arguments.name, arguments.group);
    let mut scenario = zcb_tester::Scenario::new(context, summary.clone(), filters);

    let run_time_start = Instant::now();
    println!(
        "     {} the scenario with {} wallets",
        "Running".bright_green().bold(),
        scenario.context().wallets.len() + 1,
    );
    scenario.run();
    drop(scenario);

    let summary = zcb_tester::Summary::unwrap_arc(summary);
    print!("{summary}");
    println!(
        "    {} running the scenario in {}m{:02}s",
        "Finished".bright_green().bold(),
        run_time_start.elapsed().as_secs() / 60,
        run_time_start.elapsed().as_secs() % 60,
    );

    if !summary.is_successful() {
        anyhow::bail!("");
    }

    Ok(())
}
