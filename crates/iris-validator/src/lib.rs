//! Range checks for IRIS layout trees.
//!
//! The parser only guarantees that a tree is well formed. Trees built by hand
//! or read from JSON can still carry negative spacing, zero sizes or
//! fractional repeat counts; [`validate`] reports the first such value in
//! depth-first, left-to-right order.

use iris_core::{
    Bound, Directive, Directives, Node, Program, Repeat, ValidationError, ValidationErrorKind,
};

/// Check a tree, stopping at the first violation.
pub fn validate(node: &Node) -> Result<(), ValidationError> {
    match node {
        Node::VStack(stack) | Node::HStack(stack) => {
            check_directives(&stack.directives(), node)?;
            for child in &stack.children {
                validate(child)?;
            }
        }
        Node::Skeleton(skeleton) => {
            check_directives(&skeleton.directives(), node)?;
        }
        Node::Repeat(repeat) => {
            check_repeat(repeat, node)?;
            validate(&repeat.child)?;
        }
    }
    Ok(())
}

/// Check every top-level sibling in order.
pub fn validate_program(program: &Program) -> Result<(), ValidationError> {
    for node in &program.children {
        validate(node)?;
    }
    log::debug!("validated {} top-level element(s)", program.children.len());
    Ok(())
}

fn check_directives(directives: &Directives, node: &Node) -> Result<(), ValidationError> {
    directives
        .iter()
        .try_for_each(|directive| check_directive(directive, node))
}

fn check_directive(directive: &Directive, node: &Node) -> Result<(), ValidationError> {
    let Some((bound, value)) = directive.bounded_number() else {
        return Ok(());
    };
    if bound.admits(value) {
        return Ok(());
    }

    let property = directive.property.field_name();
    let kind = match bound {
        Bound::NonNegative => ValidationErrorKind::Negative { property, value },
        Bound::Positive => ValidationErrorKind::NotPositive { property, value },
    };
    log::trace!("rejecting {} node: {}", node.type_name(), kind);
    Err(ValidationError::new(kind, node))
}

fn check_repeat(repeat: &Repeat, node: &Node) -> Result<(), ValidationError> {
    let count = repeat.count;
    if count.is_nan() || count <= 0.0 {
        return Err(ValidationError::new(
            ValidationErrorKind::RepeatCountNotPositive { count },
            node,
        ));
    }
    if count.fract() != 0.0 {
        return Err(ValidationError::new(
            ValidationErrorKind::RepeatCountNotInteger { count },
            node,
        ));
    }
    Ok(())
}
