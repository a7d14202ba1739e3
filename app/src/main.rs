fn main() -> anyhow::Result<()> {
  melo_lib::run()
}
