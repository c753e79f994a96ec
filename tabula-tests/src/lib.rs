mod mock;
mod users;

pub use mock::*;
use log::LevelFilter;
use std::env;
use tabula::Connection;
pub use users::users;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub async fn execute_tests<C: Connection>(mut connection: C) {
    connection.ping().await.expect("The connection is not alive");
    users(&mut connection).await;
}
