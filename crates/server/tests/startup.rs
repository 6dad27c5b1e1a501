use std::sync::atomic::{AtomicBool, Ordering};

#[test]
fn run_main_fails_fast_on_bad_env_override() {
    std::env::set_var("CONFIG_PATH", "/nonexistent-config-for-tests.toml");
    std::env::set_var("TASK_STORE", "postgres");

    let ran = AtomicBool::new(false);
    let code = server::startup::run_main("task_service", |_cfg| {
        ran.store(true, Ordering::SeqCst);
        async { Ok(()) }
    });

    assert_eq!(format!("{code:?}"), format!("{:?}", std::process::ExitCode::FAILURE));
    assert!(!ran.load(Ordering::SeqCst));
}
