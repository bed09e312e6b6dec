use std::io;

fn main() {
    suited_cli::logging::init_logging();
    let code = suited_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
