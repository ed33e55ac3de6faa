use anyhow::Context;

fn main() -> anyhow::Result<()> {
    peek::run().context("peek exited with an error")
}
