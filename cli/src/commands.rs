pub mod describe;
pub mod list;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// List stacks declared in the app
    List(list::ListCommand),

    /// Show resources and subscriptions declared in the stack(s)
    Describe(describe::DescribeCommand),
}
