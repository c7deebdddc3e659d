//! Property tests for the compiler pipeline.

use proptest::prelude::*;

use iris::{
    dedupe_classes, format, generate, parse, validate, AbsoluteSize, CompileOptions,
    FormatOptions, Node, Repeat, Size, Skeleton, Stack, StackDirection,
};

fn arb_size() -> impl Strategy<Value = Size> {
    prop_oneof![
        (1u32..64).prop_map(Size::from),
        prop::sample::select(vec![0.125, 0.25, 0.5, 0.75]).prop_map(Size::Value),
        prop::sample::select(AbsoluteSize::ALL.to_vec()).prop_map(Size::Absolute),
    ]
}

fn arb_skeleton() -> impl Strategy<Value = Node> {
    (
        prop::option::of(arb_size()),
        prop::option::of(arb_size()),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(width, height, rounded, pinned)| {
            Node::Skeleton(Skeleton {
                width,
                height,
                rounded: rounded.then_some(true),
                shrink: pinned.then_some(false),
                background: None,
            })
        })
}

fn arb_node() -> impl Strategy<Value = Node> {
    arb_skeleton().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            (
                any::<bool>(),
                prop::option::of(0u32..12),
                prop::option::of(0u32..12),
                any::<bool>(),
                prop::collection::vec(inner.clone(), 0..4),
            )
                .prop_map(|(vertical, gap, padding, border, children)| {
                    let direction = if vertical {
                        StackDirection::Vertical
                    } else {
                        StackDirection::Horizontal
                    };
                    Node::stack(
                        direction,
                        Stack {
                            gap: gap.map(f64::from),
                            padding: padding.map(f64::from),
                            border_bottom: border.then_some(true),
                            children,
                            ..Stack::default()
                        },
                    )
                }),
            (1u32..4, inner).prop_map(|(count, child)| Node::Repeat(Repeat::new(count, child))),
        ]
    })
}

fn write_size(axis: char, size: &Size) -> String {
    match size {
        Size::Value(value) => format!("{axis}{value}"),
        Size::Absolute(size) => format!("{axis}{}", size.keyword()),
    }
}

/// Render a tree back to the layout notation.
fn to_source(node: &Node) -> String {
    match node {
        Node::Skeleton(skeleton) => {
            let mut props = Vec::new();
            if let Some(width) = &skeleton.width {
                props.push(write_size('w', width));
            }
            if let Some(height) = &skeleton.height {
                props.push(write_size('h', height));
            }
            if skeleton.rounded == Some(true) {
                props.push("r".to_string());
            }
            if skeleton.shrink == Some(false) {
                props.push("sh0".to_string());
            }
            format!("S({})", props.join(" "))
        }
        Node::VStack(stack) | Node::HStack(stack) => {
            let tag = if matches!(node, Node::VStack(_)) { 'V' } else { 'H' };
            let mut props = Vec::new();
            if let Some(gap) = stack.gap {
                props.push(format!("g{gap}"));
            }
            if let Some(padding) = stack.padding {
                props.push(format!("p{padding}"));
            }
            if stack.border_bottom == Some(true) {
                props.push("bb".to_string());
            }
            let children: Vec<String> = stack.children.iter().map(to_source).collect();
            format!("{tag}({}){{ {} }}", props.join(" "), children.join(" "))
        }
        Node::Repeat(repeat) => format!("x{}{{ {} }}", repeat.count, to_source(&repeat.child)),
    }
}

/// `<div` openings that are not self-closing.
fn open_divs(jsx: &str) -> usize {
    jsx.match_indices("<div")
        .filter(|(start, _)| {
            let tag_end = jsx[*start..].find('>').map(|end| start + end);
            tag_end.map_or(false, |end| !jsx[..end].ends_with('/'))
        })
        .count()
}

proptest! {
    #[test]
    fn parser_reads_back_builder_trees(tree in arb_node()) {
        let source = to_source(&tree);
        prop_assert_eq!(parse(&source).unwrap(), tree);
    }

    #[test]
    fn generation_is_deterministic(tree in arb_node()) {
        let options = CompileOptions::default();
        prop_assert_eq!(generate(&tree, &options), generate(&tree, &options));
    }

    #[test]
    fn generated_trees_are_valid(tree in arb_node()) {
        prop_assert!(validate(&tree).is_ok());
    }

    #[test]
    fn div_tags_balance(tree in arb_node()) {
        let jsx = generate(&tree, &CompileOptions::default().with_pretty(false));
        prop_assert_eq!(open_divs(&jsx), jsx.matches("</div>").count());
    }

    #[test]
    fn formatter_is_a_fixed_point_on_generated_markup(tree in arb_node()) {
        let jsx = generate(&tree, &CompileOptions::default());
        prop_assert_eq!(format(&jsx, &FormatOptions::default()).unwrap(), jsx);
    }

    #[test]
    fn repeat_emits_exact_copies(count in 0u32..20) {
        let tree = Node::Repeat(Repeat::new(count, Node::Skeleton(Skeleton::default())));
        let jsx = generate(&tree, &CompileOptions::default());
        prop_assert_eq!(jsx.matches("<Skeleton").count(), count as usize);
    }

    #[test]
    fn dedupe_is_idempotent(classes in prop::collection::vec("[a-c]{1,2}(-[1-3])?", 0..12)) {
        let input = classes.join(" ");
        let once = dedupe_classes(&input);
        prop_assert_eq!(dedupe_classes(&once), once.clone());

        let mut seen = Vec::new();
        for class in &classes {
            if !seen.contains(class) {
                seen.push(class.clone());
            }
        }
        prop_assert_eq!(once, seen.join(" "));
    }

    #[test]
    fn parser_never_panics(source in "[VHSxgmpbtrlfwhs0-9(){}. \n/*-]{0,40}") {
        let _ = parse(&source);
    }
}
