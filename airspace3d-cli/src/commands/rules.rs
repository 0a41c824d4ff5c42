//! Rule listing command.

use airspace3d::altitude::ExpressionCatalog;

use crate::error::CliError;

/// Print every catalog rule with the fields it reads.
pub fn run(expressions: bool) -> Result<(), CliError> {
    for rule in ExpressionCatalog::global().rules() {
        println!("{}", rule.name());
        println!("  {}", rule.description());
        println!("  fields: {}", rule.fields().join(", "));
        if expressions {
            println!();
            for line in rule.expression().lines() {
                println!("    {}", line);
            }
        }
        println!();
    }
    Ok(())
}
