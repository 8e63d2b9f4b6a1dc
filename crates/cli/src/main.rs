//! ccc - CMake, Conan, and C++ project tool.
//!
//! Wraps the external build backends behind a small command set: builds are
//! routed to deterministic `build-<profile>-<platform>` directories and the
//! actual configure/compile work is delegated to CMake (and Conan when the
//! project declares dependencies).

mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ccc_core::{BuildConfig, Profile};

use crate::cmd::Globals;
use crate::output::OutputFormat;

/// CMake, Conan, and C++ project tool
#[derive(Parser)]
#[command(name = "ccc")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Configuration file storing default options
  #[arg(short, long, global = true, value_name = "FILE", default_value = ccc_core::DEFAULT_CONFIG_FILE)]
  config: String,

  /// Do not look for configuration files in parent directories
  #[arg(short, long, global = true)]
  local_config_only: bool,

  /// Build directory to use instead of the computed one
  #[arg(short, long, global = true, value_name = "DIR")]
  build_dir: Option<PathBuf>,

  /// Print verbose messages
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

/// Profile and platform selection shared by the build-like commands.
#[derive(Args)]
struct ProfileArgs {
  /// Use the release profile
  #[arg(short = 'R', long)]
  release: bool,

  /// Use the debug profile (the default)
  #[arg(short = 'D', long, conflicts_with = "release")]
  debug: bool,

  /// Platform label for the build directory name (default: host OS)
  #[arg(long, value_name = "NAME")]
  platform: Option<String>,
}

impl ProfileArgs {
  fn profile(&self) -> Profile {
    if self.release { Profile::Release } else { Profile::Debug }
  }

  fn build_config(&self) -> BuildConfig {
    match &self.platform {
      Some(platform) => BuildConfig::with_platform(self.profile(), platform),
      None => BuildConfig::new(self.profile()),
    }
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Configure the project (runs `conan install` first when a conanfile is present)
  Configure {
    #[command(flatten)]
    profile: ProfileArgs,

    /// Install directory passed to the configure step
    #[arg(short, long, value_name = "DIR")]
    install_prefix: Option<PathBuf>,

    /// Extra option passed to the CMake configure step (repeatable)
    #[arg(long = "extra-cmake-configure-option", value_name = "OPT")]
    extra_cmake_configure_options: Vec<String>,

    /// Extra option passed to `conan install` (repeatable)
    #[arg(long = "extra-conan-install-option", value_name = "OPT")]
    extra_conan_install_options: Vec<String>,
  },

  /// Build the project, configuring first when needed
  Build {
    #[command(flatten)]
    profile: ProfileArgs,

    /// Build a specific target
    #[arg(short, long, value_name = "TARGET")]
    target: Option<String>,

    /// Run the configure step even if the project is already configured
    #[arg(long)]
    run_configure: bool,

    /// Extra option passed to the CMake build step (repeatable)
    #[arg(long = "extra-cmake-build-option", value_name = "OPT")]
    extra_cmake_build_options: Vec<String>,
  },

  /// Build, then run the project's test executables
  Test {
    #[command(flatten)]
    profile: ProfileArgs,

    /// Only run test executables whose path contains TEXT
    #[arg(short = 'k', long = "match", value_name = "TEXT")]
    matching: Option<String>,

    /// Skip the build phase
    #[arg(short, long)]
    skip_build: bool,
  },

  /// Configure and install the project into a directory
  Install {
    /// Installation prefix
    directory: PathBuf,
  },

  /// Remove generated build directories
  Clean {
    /// Also remove everything git does not track
    #[arg(short, long)]
    all: bool,
  },

  /// Show project information
  Info {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Create a new C++ project skeleton
  New {
    /// Directory (and project name) to create
    name: String,
  },

  /// Print all source files in the project (suitable for feeding to `entr`)
  ListSources {
    /// Pattern used to identify a source file (repeatable)
    #[arg(short, long = "pattern", value_name = "GLOB")]
    patterns: Vec<String>,

    /// Pattern used to ignore identified source files (repeatable)
    #[arg(short, long = "ignore-pattern", value_name = "GLOB")]
    ignore_patterns: Vec<String>,

    /// Pattern used to re-include ignored files (repeatable)
    #[arg(short = 'I', long = "include-pattern", value_name = "GLOB")]
    include_patterns: Vec<String>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  // Initialize logging; --verbose turns on our own debug spans
  let filter = if cli.verbose {
    EnvFilter::new("ccc_cli=debug,ccc_core=debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt().with_env_filter(filter).without_time().init();

  let globals = Globals {
    config: cli.config,
    local_config_only: cli.local_config_only,
    build_dir: cli.build_dir,
  };

  match cli.command {
    Commands::Configure {
      profile,
      install_prefix,
      extra_cmake_configure_options,
      extra_conan_install_options,
    } => cmd::cmd_configure(
      &globals,
      profile.build_config(),
      install_prefix,
      extra_cmake_configure_options,
      extra_conan_install_options,
    ),
    Commands::Build {
      profile,
      target,
      run_configure,
      extra_cmake_build_options,
    } => cmd::cmd_build(
      &globals,
      profile.build_config(),
      target,
      run_configure,
      extra_cmake_build_options,
    ),
    Commands::Test {
      profile,
      matching,
      skip_build,
    } => cmd::cmd_test(&globals, profile.build_config(), matching, skip_build),
    Commands::Install { directory } => cmd::cmd_install(&globals, &directory),
    Commands::Clean { all } => cmd::cmd_clean(all),
    Commands::Info { output } => cmd::cmd_info(&globals, output),
    Commands::New { name } => cmd::cmd_new(&name),
    Commands::ListSources {
      patterns,
      ignore_patterns,
      include_patterns,
    } => cmd::cmd_list_sources(&globals, patterns, ignore_patterns, include_patterns),
  }
}
