pub mod config;
pub mod event;
pub mod generator;
pub mod job;
pub mod metrics;
pub mod session;
pub mod sink;
pub mod testing;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError, GeneratorBackend, GeneratorConfig, HttpGeneratorConfig, JobConfig, LogFormat,
    LoggingConfig, SanitizedConfig, ServerConfig, StreamConfig,
};
pub use event::{EventKind, EventPayload, StreamEvent, SERVER_ERROR_CODE};
pub use generator::{
    create_generator, Artifact, ArtifactGenerator, GenerationRequest, GeneratorError,
    HttpGenerator, PlaceholderGenerator,
};
pub use job::{JobError, JobHandle, JobRunner};
pub use session::{
    OrchestrationFault, Script, Session, SessionError, SessionOrchestrator, SessionState,
    SessionSummary, Step, StreamParams,
};
pub use sink::{channel_sink, ChannelSink, EventSink, SinkError, SinkGuard};
