use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn class(self) -> &'static str {
        match self {
            Self::Left => "text-left",
            Self::Center => "text-center",
            Self::Right => "text-right",
        }
    }
}

/// One table column. `render` produces the cell for a row.
#[derive(Clone, PartialEq)]
pub struct Column<T> {
    pub header: AttrValue,
    /// Any CSS width, e.g. "100px".
    pub width: Option<AttrValue>,
    pub align: Align,
    pub render: Callback<T, Html>,
}

impl<T: 'static> Column<T> {
    pub fn new(
        header: impl Into<AttrValue>,
        render: impl Fn(T) -> Html + 'static,
    ) -> Self {
        Self {
            header: header.into(),
            width: None,
            align: Align::Left,
            render: Callback::from(render),
        }
    }

    pub fn width(mut self, width: impl Into<AttrValue>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

fn width_style(width: &Option<AttrValue>) -> Option<String> {
    width.as_ref().map(|w| format!("width: {w}"))
}

#[derive(Properties, PartialEq)]
pub struct TableProps<T: PartialEq + 'static> {
    pub columns: Vec<Column<T>>,
    pub rows: Vec<T>,
    /// Stable identity for each row; falls back to the row index.
    #[prop_or_default]
    pub row_key: Option<Callback<T, AttrValue>>,
    #[prop_or_else(|| AttrValue::from("No data"))]
    pub empty_text: AttrValue,
}

#[function_component]
pub fn Table<T>(props: &TableProps<T>) -> Html
where
    T: Clone + PartialEq + 'static,
{
    let header = props.columns.iter().map(|column| {
        html! {
            <th
                class={classes!(
                    "px-3", "py-2", "text-sm", "font-semibold",
                    "bg-neutral-800", "text-white", column.align.class()
                )}
                style={width_style(&column.width)}
            >
                {&column.header}
            </th>
        }
    });

    let body = if props.rows.is_empty() {
        html! {
            <tr>
                <td
                    colspan={props.columns.len().to_string()}
                    class="px-3 py-4 text-sm text-center text-neutral-500"
                >
                    {&props.empty_text}
                </td>
            </tr>
        }
    } else {
        props
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let key = match &props.row_key {
                    Some(row_key) => row_key.emit(row.clone()),
                    None => AttrValue::from(index.to_string()),
                };
                html! {
                    <tr key={key.to_string()} class="border-b border-neutral-100 \
                                     dark:border-neutral-700">
                        {for props.columns.iter().map(|column| html! {
                            <td class={classes!(
                                "px-3", "py-2", "text-sm", column.align.class()
                            )}>
                                {column.render.emit(row.clone())}
                            </td>
                        })}
                    </tr>
                }
            })
            .collect::<Html>()
    };

    html! {
        <table class="w-full border-collapse">
            <thead>
                <tr>{for header}</tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
}
