fn main() -> std::process::ExitCode {
    server::startup::run_main("task_service", |cfg| server::run_tasks(cfg, server::startup::shutdown_signal()))
}
