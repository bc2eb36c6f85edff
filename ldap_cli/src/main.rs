mod report;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ldap_schema::Schema;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    init_logging(args.verbose);

    let schema = Schema::from_file(&args.schema)?;
    tracing::debug!(path = %args.schema.display(), "schema loaded");

    let output = match &args.command {
        Cmd::Attr(c) => c.run(&schema)?,
        Cmd::Oc(c) => c.run(&schema)?,
        Cmd::Search(c) => c.run(&schema),
        Cmd::Dn(c) => c.run(&schema),
        Cmd::Match(c) => c.run(&schema),
        Cmd::Normalize(c) => c.run(&schema)?,
    };
    print!("{output}");
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(clap::Parser)]
#[clap(about = "Inspect an LDAP schema document")]
struct Args {
    /// Path to a JSON schema document.
    #[clap(long, env = "LDAP_SCHEMA")]
    schema: PathBuf,

    /// Log schema loading details to stderr.
    #[clap(short, long)]
    verbose: bool,

    #[clap(subcommand)]
    command: Cmd,
}

#[derive(clap::Subcommand)]
enum Cmd {
    /// Describe an attribute type.
    Attr(CmdAttr),
    /// Describe an object class.
    Oc(CmdOc),
    /// List attribute types by name prefix.
    Search(CmdSearch),
    /// Show the canonical form and ancestors of a DN.
    Dn(CmdDn),
    /// Compare two DNs.
    Match(CmdMatch),
    /// Normalize a value under an attribute's equality rule.
    Normalize(CmdNormalize),
}

#[derive(clap::Parser)]
struct CmdAttr {
    name: String,
}

impl CmdAttr {
    fn run(&self, schema: &Schema) -> Result<String, anyhow::Error> {
        let attr = schema.require_attr(&self.name)?;
        Ok(report::describe_attr(&attr))
    }
}

#[derive(clap::Parser)]
struct CmdOc {
    name: String,
}

impl CmdOc {
    fn run(&self, schema: &Schema) -> Result<String, anyhow::Error> {
        let oc = schema.require_oc(&self.name)?;
        Ok(report::describe_oc(&oc))
    }
}

#[derive(clap::Parser)]
struct CmdSearch {
    prefix: String,
}

impl CmdSearch {
    fn run(&self, schema: &Schema) -> String {
        schema
            .search(&self.prefix)
            .iter()
            .map(|attr| format!("{}\n", attr.name()))
            .collect()
    }
}

#[derive(clap::Parser)]
struct CmdDn {
    /// Stop listing ancestors at this DN.
    #[clap(long)]
    stop_at: Option<String>,

    dn: String,
}

impl CmdDn {
    fn run(&self, schema: &Schema) -> String {
        let dn = schema.dn(&self.dn);
        let stop_at = self.stop_at.as_deref().map(|text| schema.dn(text));
        report::describe_dn(&dn, stop_at.as_ref())
    }
}

#[derive(clap::Parser)]
struct CmdMatch {
    a: String,
    b: String,
}

impl CmdMatch {
    fn run(&self, schema: &Schema) -> String {
        report::describe_match(&schema.dn(&self.a), &schema.dn(&self.b))
    }
}

#[derive(clap::Parser)]
struct CmdNormalize {
    attr: String,
    value: String,
}

impl CmdNormalize {
    fn run(&self, schema: &Schema) -> Result<String, anyhow::Error> {
        let attr = schema
            .require_attr(&self.attr)
            .with_context(|| format!("Could not normalize '{}'", self.value))?;
        Ok(format!("{}\n", attr.normalize(&self.value)))
    }
}
