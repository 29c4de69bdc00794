use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "converge")]
#[command(version)]
#[command(about = "Converge OpenShift resources to a desired state", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile a BuildConfig
    BuildConfig(BuildConfigArgs),

    /// Reconcile a DeploymentConfig
    DeployConfig(DeployConfigArgs),

    /// Reconcile a Service
    Service(ServiceArgs),

    /// Reconcile a ServiceAccount and its role bindings
    ServiceAccount(ServiceAccountArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Shared argument groups
// ============================================================================

#[derive(Args)]
pub struct ConnectionArgs {
    /// URL of the OpenShift master, e.g. https://master.example.com:8443
    #[arg(long, env = "CONVERGE_MASTER_URL")]
    pub master_url: String,

    /// Bearer token of the service account used for API calls
    #[arg(long, env = "CONVERGE_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Skip TLS certificate verification (self-signed masters)
    #[arg(long)]
    pub insecure_skip_tls_verify: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

#[derive(Args)]
pub struct ResourceArgs {
    /// Project (namespace) the resource lives in
    #[arg(short = 'n', long)]
    pub namespace: String,

    /// Resource name
    #[arg(long)]
    pub name: String,

    /// Whether the resource should exist
    #[arg(long, value_enum, default_value_t = State::Present)]
    pub state: State,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum State {
    Present,
    Absent,
}

// ============================================================================
// Per-resource arguments
// ============================================================================

#[derive(Args)]
pub struct BuildConfigArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub resource: ResourceArgs,

    /// Build trigger policies, JSON array
    #[arg(long, value_parser = parse_json)]
    pub triggers: Option<Value>,

    /// How builds are scheduled: Serial, SerialLatestOnly or Parallel
    #[arg(long)]
    pub run_policy: Option<String>,

    /// Service account used to run the build pod
    #[arg(long)]
    pub service_account: Option<String>,

    /// Source definition (v1.BuildSource), JSON object
    #[arg(long, value_parser = parse_json)]
    pub source: Option<Value>,

    /// Build strategy, JSON object
    #[arg(long, value_parser = parse_json)]
    pub strategy: Option<Value>,

    /// Output image definition (v1.BuildOutput), JSON object
    #[arg(long, value_parser = parse_json)]
    pub output: Option<Value>,

    /// Resource requirements for the build, JSON object
    #[arg(long, value_parser = parse_json)]
    pub resources: Option<Value>,

    /// Post-commit build hook, JSON object
    #[arg(long, value_parser = parse_json)]
    pub post_commit: Option<Value>,
}

#[derive(Args)]
pub struct DeployConfigArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub resource: ResourceArgs,

    /// Deployment strategy, JSON object
    #[arg(long, value_parser = parse_json)]
    pub strategy: Option<Value>,

    /// Deployment trigger policies, JSON array
    #[arg(long, value_parser = parse_json)]
    pub triggers: Option<Value>,

    /// Desired replica count
    #[arg(long, default_value_t = 1)]
    pub replicas: i64,

    /// Mark the config as a test deployment
    #[arg(long)]
    pub test: bool,

    /// Pod selector, JSON object
    #[arg(long, value_parser = parse_json)]
    pub selector: Option<Value>,

    /// Pod template, JSON object
    #[arg(long, value_parser = parse_json)]
    pub template: Option<Value>,
}

#[derive(Args)]
pub struct ServiceArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub resource: ResourceArgs,

    /// Exposed ports, JSON array
    #[arg(long, value_parser = parse_json)]
    pub ports: Option<Value>,

    /// Pod selector, JSON object
    #[arg(long, value_parser = parse_json)]
    pub selector: Option<Value>,

    /// Requested cluster IP
    #[arg(long)]
    pub cluster_ip: Option<String>,

    /// Service type
    #[arg(long = "type", value_enum, default_value_t = ServiceType::ClusterIp)]
    pub service_type: ServiceType,

    /// External IPs, JSON array
    #[arg(long, value_parser = parse_json)]
    pub external_ips: Option<Value>,

    /// Session affinity
    #[arg(long, value_enum, default_value_t = SessionAffinity::None)]
    pub session_affinity: SessionAffinity,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ServiceType {
    #[value(name = "ClusterIP")]
    ClusterIp,
    #[value(name = "NodePort")]
    NodePort,
    #[value(name = "LoadBalancer")]
    LoadBalancer,
}

impl ServiceType {
    /// Spelling the API expects in the service spec.
    pub fn as_value(self) -> &'static str {
        match self {
            Self::ClusterIp => "ClusterIP",
            Self::NodePort => "NodePort",
            Self::LoadBalancer => "LoadBalancer",
        }
    }
}

/// Session affinity values. `None` here is the literal Kubernetes value,
/// not an absence marker — the field is always sent.
#[derive(Clone, Copy, ValueEnum)]
pub enum SessionAffinity {
    #[value(name = "None")]
    None,
    #[value(name = "ClientIP")]
    ClientIp,
}

impl SessionAffinity {
    /// Spelling the API expects in the service spec.
    pub fn as_value(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::ClientIp => "ClientIP",
        }
    }
}

#[derive(Args)]
pub struct ServiceAccountArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub resource: ResourceArgs,

    /// Role to bind the account to (repeatable)
    #[arg(long = "role")]
    pub roles: Vec<String>,
}

/// Parse a structured CLI value given as a JSON literal.
fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|err| format!("invalid JSON: {err}"))
}
