//! `torii methods` command.

use clap::Args;

use torii_dispatch::UNDECLARED_SIGNATURE;

use crate::shared;

/// List the exposed RPC methods.
#[derive(Debug, Args)]
pub struct MethodsArgs {
    /// Include declared signatures and documentation.
    #[arg(long)]
    pub verbose: bool,
}

/// Executes the methods command.
pub fn execute(args: &MethodsArgs) -> anyhow::Result<()> {
    let mapper = shared::build_mapper();
    for name in mapper.list_methods() {
        if args.verbose {
            let (signature, help) = match mapper.lookup(&name, None) {
                Some(bound) => {
                    let descriptor = bound.descriptor();
                    let signature = match descriptor.signature {
                        Some(signature) => signature.join(", "),
                        None => UNDECLARED_SIGNATURE.to_string(),
                    };
                    (signature, descriptor.help())
                }
                None => (UNDECLARED_SIGNATURE.to_string(), String::new()),
            };
            println!("{name}  [{signature}]");
            if !help.is_empty() {
                println!("    {}", help.replace('\n', "\n    "));
            }
        } else {
            println!("{name}");
        }
    }
    Ok(())
}
