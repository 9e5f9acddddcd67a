use site_config::SiteConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Route a parsed command to its handler.
pub fn dispatch(command: Commands, config: &SiteConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::List(args) => {
            let ctx = AppContext::load(config, &args.data)?;
            commands::list::handle(&ctx, flags)
        }
        Commands::Sections(args) => {
            let ctx = AppContext::load(config, &args.data.data)?;
            commands::sections::handle(&args.id, &ctx, flags)
        }
        Commands::Edit(args) => {
            let mut ctx = AppContext::load(config, &args.data.data)?;
            commands::edit::handle(&args, &mut ctx, flags)
        }
        Commands::Blogs(args) => commands::blogs::handle(&args, config, flags),
    }
}
