fn main() -> anyhow::Result<()> {
    vocabox_cli::run()
}
