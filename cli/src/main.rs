use fanout::error::Error;

fn main() {
    if let Err(error) = fanout::cli::run() {
        report(&error);
        std::process::exit(1)
    }
}

fn report(error: &Error) {
    eprintln!("\n{}\n{error}", console::style("Error").red().bold());
}
