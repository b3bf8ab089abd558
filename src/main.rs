fn main() -> std::process::ExitCode {
    portfolio_chat::run()
}
