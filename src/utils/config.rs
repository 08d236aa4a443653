#![forbid(unsafe_code)]

use anyhow::{Result, anyhow};
use log::{info, error, LevelFilter};
use serde::Deserialize;
use std::{env, fs, path::Path};
use toml;
use lazy_static::lazy_static;
use structopt::StructOpt;

use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

// Server utilities
use crate::utils::errors::Errors;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// File locations.  Relative paths are resolved against the server's working
// directory at start up.
const ENV_CONFIG_FILE      : &str = "HELLO_SERVER_CONFIG";
const DEFAULT_CONFIG_FILE  : &str = "hello_server.toml";
const ENV_LOG_CONFIG_FILE  : &str = "HELLO_SERVER_LOG_CONFIG";
const DEFAULT_LOG_CONFIG_FILE : &str = "log4rs.yml";

// Networking.
const DEFAULT_HTTP_ADDR    : &str = "0.0.0.0";
const DEFAULT_HTTP_PORT    : u16  = 8000;

// Descriptive text surfaced on the generated documentation pages.
const DEFAULT_TITLE        : &str = "Hello World API";
const DEFAULT_DESCRIPTION  : &str = "A simple Hello World web service";

// Pattern used when no log4rs configuration file is present.
const DEFAULT_LOG_PATTERN  : &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {h({l})} {t} - {m}{n}";

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Assign the command line arguments BEFORE RUNTIME_CTX is initialized in main.
lazy_static! {
    pub static ref SERVER_ARGS: ServerArgs = init_server_args();
}

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// CommandLineArgs:
// ---------------------------------------------------------------------------
#[derive(Debug, StructOpt)]
#[structopt(name = "hello_server", about = "Command line arguments for the hello server.")]
pub struct ServerArgs {
    /// Specify the server's configuration file.
    ///
    /// The TOML file that assigns the server's network address, port and
    /// the descriptive text shown on the documentation pages.  The
    /// HELLO_SERVER_CONFIG environment variable overrides this argument
    /// when set.
    #[structopt(short, long)]
    pub config_file: Option<String>,
}

// ---------------------------------------------------------------------------
// Parms:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct Parms {
    pub config_file: String,
    pub config: Config,
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct RuntimeCtx {
    pub parms: Parms,
    pub server_args: &'static ServerArgs,
}

// ---------------------------------------------------------------------------
// Config:
// ---------------------------------------------------------------------------
// Fields missing from the configuration file take their default values.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub description: String,
    pub http_addr: String,
    pub http_port: u16,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

// ***************************************************************************
//                            Argument Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_server_args:
// ---------------------------------------------------------------------------
/** Get the command line arguments. */
fn init_server_args() -> ServerArgs {
    let args = ServerArgs::from_args();
    println!("{:?}", args);
    args
}

// ---------------------------------------------------------------------------
// get_config_file_path:
// ---------------------------------------------------------------------------
fn get_config_file_path() -> String {
    // Order of precedence:
    //  1. Environment variable
    //  2. Command line --config-file argument
    //  3. Default location
    //
    env::var(ENV_CONFIG_FILE).unwrap_or_else(
        |_| {
            match SERVER_ARGS.config_file.clone() {
                Some(f) => f,
                None => DEFAULT_CONFIG_FILE.to_string(),
            }
        })
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
/** Initialize log4rs logging.  A log4rs configuration file is used when one
 * exists at the resolved path, otherwise a console logger is configured in
 * code so the server always starts with logging in place.
 */
pub fn init_log() {
    let logconfig = get_log_config_file_path();
    if Path::new(&logconfig).exists() {
        match log4rs::init_file(logconfig.clone(), Default::default()) {
            Ok(_) => (),
            Err(e) => {
                println!("{}", e);
                let s = format!("{}", Errors::Log4rsInitialization(logconfig));
                panic!("{}", s);
            },
        }
        info!("Log4rs initialized using: {}", logconfig);
    } else {
        init_default_log();
        info!("Log4rs initialized using the built-in console configuration.");
    }
}

// ---------------------------------------------------------------------------
// get_log_config_file_path:
// ---------------------------------------------------------------------------
fn get_log_config_file_path() -> String {
    env::var(ENV_LOG_CONFIG_FILE).unwrap_or_else(|_| DEFAULT_LOG_CONFIG_FILE.to_string())
}

// ---------------------------------------------------------------------------
// init_default_log:
// ---------------------------------------------------------------------------
/** Install a console appender at Info level.  Any failure results in a
 * panic since the server never runs without logging.
 */
fn init_default_log() {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN)))
        .build();
    let config = match log4rs::config::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info)) {
            Ok(c) => c,
            Err(e) => {
                let s = format!("{}", Errors::Log4rsDefaultConfig(e.to_string()));
                panic!("{}", s);
            },
        };
    match log4rs::init_config(config) {
        Ok(_) => (),
        Err(e) => {
            let s = format!("{}", Errors::Log4rsDefaultConfig(e.to_string()));
            panic!("{}", s);
        },
    }
}

/// ***************************************************************************
//                             Parms Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_parms:
// ---------------------------------------------------------------------------
/** Retrieve the application parameters from the configuration file specified
 * either through an environment variable or as a command line argument.  If
 * neither are provided, an attempt is made to use the default file path.
 */
fn get_parms() -> Result<Parms> {
    // Get the config file path.
    let config_file = get_config_file_path();

    // Read the configuration file.
    info!("{}", Errors::ReadingConfigFile(config_file.clone()));
    let contents = match fs::read_to_string(&config_file) {
        Ok(c) => c,
        Err(_) => {
            println!("Unable to read configuration at {}. Using default values.", config_file);
            return Ok(Parms { config_file: Default::default(), config: Config::new() });
        }
    };

    // Parse the toml configuration.
    let config : Config = match toml::from_str(&contents) {
        Ok(c)  => c,
        Err(e) => {
            let msg = format!("{}\n   {}", Errors::TOMLParseError(config_file), e);
            error!("{}", msg);
            return Result::Err(anyhow!(msg));
        }
    };

    Ok(Parms { config_file, config })
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
pub fn init_runtime_context() -> RuntimeCtx {
    // If this fails the application aborts.
    let parms = get_parms().expect("FAILED to read configuration file.");
    RuntimeCtx { parms, server_args: &SERVER_ARGS }
}
