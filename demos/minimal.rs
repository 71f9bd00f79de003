// Minimal example: a tiny accordion rendered into an in-memory buffer.
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::StatefulWidget;

use tui_listbox::{ListboxNode, ListboxState, ListboxStyle, ListboxView, TextRows};

fn main() {
    // One container, one group with two items, one loose item.
    let mut tree = ListboxNode::container()
        .with_header("Fruit")
        .child(
            ListboxNode::group()
                .with_value("citrus")
                .with_open(true)
                .child(ListboxNode::label("Citrus"))
                .child(ListboxNode::item("orange").with_value("orange"))
                .child(ListboxNode::item("lemon").with_value("lemon")),
        )
        .child(ListboxNode::item("apple").with_value("apple"))
        .with_footer("+ add fruit");

    // Initializes open flags: the container opens, closed groups stay shut.
    tree.attach();

    // State holds scroll position and hit regions and must live across frames.
    let mut state = ListboxState::new();
    let widget = ListboxView::new(&tree, &TextRows, ListboxStyle::default());

    // Render into a buffer (no terminal required for the example).
    let area = Rect::new(0, 0, 32, 9);
    let mut buffer = Buffer::empty(area);
    widget.render(area, &mut buffer, &mut state);

    for y in 0..area.height {
        let line: String = (0..area.width)
            .map(|x| buffer.cell((x, y)).map_or(" ", |cell| cell.symbol()))
            .collect();
        println!("{line}");
    }
}
