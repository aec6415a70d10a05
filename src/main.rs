use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use vpn_subnet_summary::inventory::{cache_file_or_default, read_host_cache};
use vpn_subnet_summary::logging::{init_logging, LogLevel};
use vpn_subnet_summary::output::{print_report, ReportFormat};
use vpn_subnet_summary::{reconcile, Config};

/// VPN server API parser
///
/// The config file must begin with a section named [default].
/// The [default] section must contain the api_url, subnet and new_prefix.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
struct Args {
    /// Config file
    #[arg(short, long, default_value = "config")]
    config: PathBuf,

    /// Set the logging level
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = LogLevel::Debug)]
    log_level: LogLevel,

    /// Set logging output file
    #[arg(short, long, default_value = "output.log")]
    output: PathBuf,

    /// log4rs YAML config, replaces the log file settings
    #[arg(long)]
    log_config: Option<PathBuf>,

    /// Read servers from this file if it exists, else fetch and save them there
    #[arg(long)]
    cache_file: Option<PathBuf>,

    /// Cache servers in servers_cache_<date>.json when --cache-file is not given
    #[arg(long)]
    cache: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    let args = Args::parse();
    init_logging(args.log_config.as_deref(), &args.output, args.log_level)?;
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let config = Config::load(&args.config)?;
    println!(
        "api_url={}\nsubnet={}\nnew_prefix={}\n",
        config.api_url, config.subnet, config.new_prefix
    );

    let cache_file = cache_file_or_default(args.cache_file, args.cache);
    let inventory = read_host_cache(cache_file.as_deref(), &config.api_url).await?;
    println!(
        "loaded {} online servers from the API\n",
        inventory.hosts.len()
    );

    let result = reconcile(&config, inventory)?;
    print_report(&result, args.format);

    log::info!("#End main()");
    Ok(())
}
