use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::StatefulWidget;

use tui_listbox::{ListboxNode, ListboxState, ListboxStyle, ListboxView, TextRows};

fn big_tree(groups: usize, items: usize) -> ListboxNode<usize> {
    let mut tree = ListboxNode::container()
        .with_header("bench")
        .with_children((0..groups).map(|g| {
            ListboxNode::group()
                .with_value(g)
                .with_open(true)
                .child(ListboxNode::label(format!("group {g}")))
                .with_children(
                    (0..items).map(|i| {
                        ListboxNode::item(format!("item {i}")).with_value(g * items + i)
                    }),
                )
        }))
        .with_footer("done");
    tree.attach();
    tree
}

fn bench_flatten(c: &mut Criterion) {
    let tree = big_tree(200, 5);
    let mut state = ListboxState::new();

    c.bench_function("flatten_1200_rows", |b| {
        b.iter(|| {
            state.invalidate();
            state.ensure_rows(black_box(&tree));
            black_box(state.row_count())
        });
    });
}

fn bench_click_toggle(c: &mut Criterion) {
    let mut tree = big_tree(200, 5);
    let mut state = ListboxState::new();

    let area = Rect::new(0, 0, 60, 40);
    let mut buf = Buffer::empty(area);
    ListboxView::new(&tree, &TextRows, ListboxStyle::default()).render(area, &mut buf, &mut state);

    let body = state.body_area();
    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: body.x,
        row: body.y,
        modifiers: KeyModifiers::empty(),
    };

    c.bench_function("toggle_group_and_reflatten", |b| {
        b.iter(|| {
            let events = state.handle_mouse(&mut tree, black_box(click));
            state.ensure_rows(&tree);
            black_box(events.len())
        });
    });
}

fn bench_render(c: &mut Criterion) {
    let tree = big_tree(200, 5);
    let mut state = ListboxState::new();
    let area = Rect::new(0, 0, 60, 40);
    let mut buf = Buffer::empty(area);

    c.bench_function("render_60x40", |b| {
        b.iter(|| {
            buf.reset();
            let widget = ListboxView::new(&tree, &TextRows, ListboxStyle::default());
            widget.render(area, &mut buf, &mut state);
        });
    });
}

criterion_group!(benches, bench_flatten, bench_click_toggle, bench_render);
criterion_main!(benches);
