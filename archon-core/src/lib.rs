pub mod cli;
pub mod conf;
pub mod dispatch;
pub mod logging;
pub mod parse;
pub mod pipeline;
pub mod present;
pub mod queue;
pub mod record;
pub mod shutdown;
pub mod simulate;
pub mod tail;
