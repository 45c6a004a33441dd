fn main() {
    verbnet::cli::run();
}
