//! Tree to markup.

use iris_core::{Node, Program, Skeleton, Stack, StackDirection};

use crate::classes::{skeleton_classes, stack_classes};
use crate::format::render;
use crate::markup::{Element, Markup};
use crate::options::CompileOptions;

const FRAGMENT: &str = "React.Fragment";

/// Markup for a tree. A repeat contributes its copies as siblings, so the
/// result may hold any number of nodes.
pub fn generate_markup(node: &Node) -> Vec<Markup> {
    let mut out = Vec::new();
    push_node(node, &mut out);
    out
}

/// Render a tree as formatted markup.
pub fn generate(node: &Node, options: &CompileOptions) -> String {
    let markup = generate_markup(node);
    log::debug!("generated {} root element(s) for {}", markup.len(), node.type_name());
    render(&markup, &options.format)
}

/// Render top-level siblings. Several roots are wrapped in a fragment, or in
/// a vertical stack when fragments are disabled.
pub fn generate_program(program: &Program, options: &CompileOptions) -> String {
    match program.children.as_slice() {
        [] => String::new(),
        [only] => generate(only, options),
        children if options.use_fragment => {
            let mut inner = Vec::new();
            for child in children {
                push_node(child, &mut inner);
            }
            let fragment = Element::new(FRAGMENT).with_children(inner);
            log::debug!("wrapped {} roots in a fragment", children.len());
            render(&[Markup::Element(fragment)], &options.format)
        }
        children => {
            let wrapper = stack_element(StackDirection::Vertical, &Stack::default(), children);
            render(&[Markup::Element(wrapper)], &options.format)
        }
    }
}

fn push_node(node: &Node, out: &mut Vec<Markup>) {
    match node {
        Node::VStack(stack) => {
            out.push(stack_element(StackDirection::Vertical, stack, &stack.children).into())
        }
        Node::HStack(stack) => {
            out.push(stack_element(StackDirection::Horizontal, stack, &stack.children).into())
        }
        Node::Skeleton(skeleton) => out.push(skeleton_element(skeleton).into()),
        Node::Repeat(repeat) => {
            let mut once = Vec::new();
            push_node(&repeat.child, &mut once);
            for _ in 0..repeat.copies() {
                out.extend(once.iter().cloned());
            }
        }
    }
}

fn stack_element(direction: StackDirection, stack: &Stack, children: &[Node]) -> Element {
    let element = Element::new("div").with_classes(&stack_classes(direction, stack));
    if children.is_empty() {
        return element.self_closing();
    }

    let mut inner = Vec::new();
    for child in children {
        push_node(child, &mut inner);
    }
    element.with_children(inner)
}

fn skeleton_element(skeleton: &Skeleton) -> Element {
    Element::new("Skeleton")
        .with_classes(&skeleton_classes(skeleton))
        .self_closing()
}
