fn main() {
    astopt::projects::cli::start_cli();
}
