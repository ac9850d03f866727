fn main() -> miette::Result<()> {
    cmake_class_creator::cli::run()
}
