fn main() -> std::process::ExitCode {
    server::startup::run_main("search_service", |cfg| server::run_search(cfg, server::startup::shutdown_signal()))
}
