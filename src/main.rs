fn main() -> Result<(), Box<dyn std::error::Error>> {
    vibe_architect::cli::main()
}
