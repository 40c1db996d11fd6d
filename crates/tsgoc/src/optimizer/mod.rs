//! IR optimizer.
//!
//! An ordered list of passes, each a pure `Module -> Module` function,
//! selected by optimization level:
//!
//! - Level 0: none
//! - Level 1: dead-code elimination, constant folding
//! - Level 2: type simplification, control-flow normalization, inlining
//!
//! The pass order is fixed at registration; reordering is a configuration
//! decision, never a runtime one. Inlining is registered but currently the
//! identity transform.

mod dce;
mod fold;
mod normalize;
mod simplify;

use tsgo_ir::Module;

pub use dce::eliminate_dead_code;
pub use fold::fold_constants;
pub use normalize::normalize_control_flow;
pub use simplify::simplify_types;

/// A registered optimizer pass.
pub struct Pass {
    pub name: &'static str,
    run: fn(Module) -> Module,
}

impl Pass {
    pub fn run(&self, module: Module) -> Module {
        (self.run)(module)
    }
}

fn inline_functions(module: Module) -> Module {
    // Registered for pass-order stability; not yet implemented.
    module
}

/// The pass list for an optimization level, in execution order.
pub fn passes_for_level(level: u8) -> Vec<Pass> {
    let mut passes = Vec::new();
    if level >= 1 {
        passes.push(Pass {
            name: "dead-code-elimination",
            run: eliminate_dead_code,
        });
        passes.push(Pass {
            name: "constant-folding",
            run: fold_constants,
        });
    }
    if level >= 2 {
        passes.push(Pass {
            name: "type-simplification",
            run: simplify_types,
        });
        passes.push(Pass {
            name: "control-flow-normalization",
            run: normalize_control_flow,
        });
        passes.push(Pass {
            name: "inlining",
            run: inline_functions,
        });
    }
    passes
}

/// Runs every pass for the level, in order, producing a new module.
pub fn optimize(module: Module, level: u8) -> Module {
    passes_for_level(level)
        .iter()
        .fold(module, |m, pass| pass.run(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_zero_has_no_passes() {
        assert!(passes_for_level(0).is_empty());
    }

    #[test]
    fn level_one_runs_dce_then_folding() {
        let names: Vec<&str> = passes_for_level(1).iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["dead-code-elimination", "constant-folding"]);
    }

    #[test]
    fn level_two_appends_the_optional_passes() {
        let names: Vec<&str> = passes_for_level(2).iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec![
                "dead-code-elimination",
                "constant-folding",
                "type-simplification",
                "control-flow-normalization",
                "inlining"
            ]
        );
    }
}
