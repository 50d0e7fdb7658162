use std::io::Write;

use env_logger::{Builder, Env};

// info by default, RUST_LOG overrides
pub fn init_logger() -> Result<(), log::SetLoggerError> {

    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:<5}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .try_init()
}
