use crate::commands::{
    run_check, run_coverage, run_explain, run_resolve, CheckArgs, CoverageArgs, ExplainArgs,
    ResolveArgs,
};
use crate::demo::{run_demo, DemoArgs};
use clap::{Args, Parser, Subcommand};
use civic_prefill::config::AppConfig;
use civic_prefill::error::AppError;
use civic_prefill::prefill::{Locale, MatchScope, PrefillOptions};
use civic_prefill::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "civic-prefill",
    about = "Pre-fill citizen portal forms from a citizen profile",
    version
)]
struct Cli {
    #[command(flatten)]
    overrides: OptionOverrides,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute initial values for a form definition
    Resolve(ResolveArgs),
    /// Check whether saved pre-fill values still match a profile
    Check(CheckArgs),
    /// Show how field ids are classified
    Explain(ExplainArgs),
    /// Audit classification coverage over a field catalog CSV
    Coverage(CoverageArgs),
    /// Walk through a sample form end to end (default command)
    Demo(DemoArgs),
}

/// Per-invocation overrides on top of the environment configuration.
#[derive(Args, Debug, Default)]
struct OptionOverrides {
    /// Which field ids may be pre-filled: `all` or `citizen`
    #[arg(long, global = true, value_parser = crate::infra::parse_scope)]
    scope: Option<MatchScope>,
    /// Format CPF, phones and CEP as masked inputs display them
    #[arg(long, global = true)]
    apply_masks: bool,
    /// Language of the completeness message: `pt-BR` or `en`
    #[arg(long, global = true, value_parser = crate::infra::parse_locale)]
    locale: Option<Locale>,
}

impl OptionOverrides {
    fn apply(self, options: &mut PrefillOptions) {
        if let Some(scope) = self.scope {
            options.match_scope = scope;
        }
        if self.apply_masks {
            options.apply_masks = true;
        }
        if let Some(locale) = self.locale {
            options.locale = locale;
        }
    }
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    cli.overrides.apply(&mut config.prefill);
    debug!(environment = ?config.environment, options = ?config.prefill, "configuration loaded");

    let options = config.prefill;
    match cli.command.unwrap_or_else(|| Command::Demo(DemoArgs::default())) {
        Command::Resolve(args) => run_resolve(args, options),
        Command::Check(args) => run_check(args, options),
        Command::Explain(args) => run_explain(args, options),
        Command::Coverage(args) => run_coverage(args, options),
        Command::Demo(args) => run_demo(args, options),
    }
}
