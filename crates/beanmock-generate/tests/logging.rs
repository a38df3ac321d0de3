use beanmock_generate::MockError;
use beanmock_generate::logging::init_logging;

#[test]
fn logging_installs_once() {
    assert!(matches!(
        init_logging("beanmock=notalevel"),
        Err(MockError::Logging(_))
    ));

    init_logging("beanmock_generate=debug").expect("first install");
    assert!(matches!(
        init_logging("info"),
        Err(MockError::Logging(_))
    ));

    tracing::info!(target: "beanmock_generate", "subscriber installed");
}
