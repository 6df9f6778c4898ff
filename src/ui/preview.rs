/// On-screen flyer preview
///
/// Walks the composed document tree and maps every node to iced widgets,
/// resolving color roles through the document's palette. The same tree is
/// what the export rasterizer paints, so what you see is what you get.

use iced::widget::{
    button, column, container, horizontal_rule, mouse_area, row, scrollable, text, toggler,
    Column, Space, Stack,
};
use iced::{alignment, Alignment, Background, Border, Color, Element, Font, Length, Radians, Theme};

use crate::flyer::doc::{Align, Node};
use crate::flyer::projects::PROJECTS;
use crate::flyer::render::FlyerDocument;
use crate::state::images::{ImageSlots, Slot};
use crate::state::selection::SelectionState;
use crate::theme::{Gradient, ResolvedPalette, Rgb};
use crate::Message;

/// Logical width of the flyer surface on screen
const PAGE_WIDTH: f32 = 800.0;

struct Ctx<'a> {
    palette: &'a ResolvedPalette,
    slots: &'a ImageSlots,
    qr: Option<&'a iced::widget::image::Handle>,
}

/// Build the preview view: toolbar, the flyer page, and the project overlay.
pub fn view(
    doc: &FlyerDocument,
    slots: &ImageSlots,
    qr: Option<&iced::widget::image::Handle>,
    selection: &SelectionState,
    status: &str,
    exporting: bool,
) -> Element<'static, Message> {
    let ctx = Ctx { palette: &doc.palette, slots, qr };

    let surface = doc.palette.surface;
    let page = container(node_view(&ctx, &doc.root))
        .width(PAGE_WIDTH)
        .padding(16)
        .style(move |_: &Theme| container::Style {
            background: Some(Background::Color(surface.into())),
            border: Border {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.15),
                width: 1.0,
                radius: 4.0.into(),
            },
            ..container::Style::default()
        });

    let export_label = if exporting { "⏳ Exporting…" } else { "💾 Download PNG Flyer" };
    let mut export_button = button(text(export_label).size(14))
        .padding(10)
        .style(button::primary);
    if !exporting {
        export_button = export_button.on_press(Message::ExportRequested);
    }

    let toolbar = row![
        button(text("← Edit").size(14))
            .padding(10)
            .on_press(Message::ShowEditor),
        text(status.to_string()).size(13),
        Space::with_width(Length::Fill),
        toggler(selection.dark_mode)
            .label("Dark Mode")
            .on_toggle(Message::DarkModeToggled),
        export_button,
    ]
    .spacing(14)
    .align_y(Alignment::Center);

    let base: Element<Message> = column![
        toolbar,
        scrollable(container(page).center_x(Length::Fill).padding(12)),
    ]
    .spacing(12)
    .padding(16)
    .into();

    match selection.selected_project {
        Some(index) => Stack::with_children(vec![base, project_overlay(&ctx, index)]).into(),
        None => base,
    }
}

/// The enlarged-project overlay: a scrim that closes on click, with the
/// project card on top swallowing its own clicks.
fn project_overlay(ctx: &Ctx, index: usize) -> Element<'static, Message> {
    let project = &PROJECTS[index.min(PROJECTS.len() - 1)];

    let thumb: Element<Message> = match ctx.slots.handle(work_slot(index)) {
        Some(handle) => iced::widget::image(handle)
            .width(360)
            .height(200)
            .content_fit(iced::ContentFit::Cover)
            .into(),
        None => placeholder_thumb(ctx, index, 360.0, 200.0),
    };

    let card_bg = ctx.palette.card;
    let text_color = ctx.palette.text;
    let card = container(
        column![
            text(project.title).size(18).font(bold()).color(text_color),
            thumb,
            text(project.caption).size(14).color(text_color),
            button(text("Close").size(14))
                .padding(8)
                .on_press(Message::CloseProject),
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .padding(20)
    .style(move |_: &Theme| container::Style {
        background: Some(Background::Color(card_bg.into())),
        border: Border { radius: 10.0.into(), ..Border::default() },
        ..container::Style::default()
    });

    // Clicks on the card re-select (a no-op); clicks anywhere else dismiss
    let pinned = mouse_area(card).on_press(Message::ProjectSelected(index));

    mouse_area(
        container(pinned)
            .center(Length::Fill)
            .style(|_: &Theme| container::Style {
                background: Some(Background::Color(Color { a: 0.6, ..Color::BLACK })),
                ..container::Style::default()
            }),
    )
    .on_press(Message::CloseProject)
    .into()
}

fn node_view(ctx: &Ctx, node: &Node) -> Element<'static, Message> {
    match node {
        Node::Column { spacing, children } => {
            Column::with_children(children.iter().map(|n| node_view(ctx, n)))
                .spacing(*spacing)
                .into()
        }

        Node::Split { ratio, spacing, tinted_left, left, right } => {
            let left_col = Column::with_children(left.iter().map(|n| node_view(ctx, n))).spacing(14);
            let right_col =
                Column::with_children(right.iter().map(|n| node_view(ctx, n))).spacing(14);

            let left_el: Element<Message> = if *tinted_left {
                container(left_col)
                    .padding(12)
                    .width(Length::FillPortion(ratio.0))
                    .style(fill_style(ctx.palette.card))
                    .into()
            } else {
                left_col.width(Length::FillPortion(ratio.0)).into()
            };

            row![left_el, right_col.width(Length::FillPortion(ratio.1))]
                .spacing(*spacing)
                .into()
        }

        Node::GradientBand { padding, children } => {
            let gradient = ctx.palette.header_gradient;
            container(
                Column::with_children(children.iter().map(|n| node_view(ctx, n))).spacing(10),
            )
            .width(Length::Fill)
            .padding(*padding)
            .style(move |_: &Theme| container::Style {
                background: Some(gradient_bg(gradient)),
                border: Border { radius: 6.0.into(), ..Border::default() },
                ..container::Style::default()
            })
            .into()
        }

        Node::Card { tint, accent, padding, children } => {
            let body = container(
                Column::with_children(children.iter().map(|n| node_view(ctx, n))).spacing(6),
            )
            .width(Length::Fill)
            .padding(*padding)
            .style(fill_style(ctx.palette.color(*tint)));

            match accent {
                Some(accent) => row![
                    container(Space::with_width(0))
                        .width(4)
                        .height(Length::Fill)
                        .style(fill_style(ctx.palette.color(*accent))),
                    body,
                ]
                .into(),
                None => body.into(),
            }
        }

        Node::TitledCard { title, title_bg, children } => {
            let bar = container(
                text(title.clone()).size(16).font(bold()).color(Color::WHITE),
            )
            .width(Length::Fill)
            .padding(8)
            .style(fill_style(ctx.palette.color(*title_bg)));

            let body = container(
                Column::with_children(children.iter().map(|n| node_view(ctx, n))).spacing(10),
            )
            .width(Length::Fill)
            .padding(12)
            .style(fill_style(ctx.palette.card));

            column![bar, body].into()
        }

        Node::Text { content, size, color, bold: is_bold, align } => {
            let mut t = text(content.clone()).size(*size).color(ctx.palette.color(*color));
            if *is_bold {
                t = t.font(bold());
            }
            match align {
                Align::Left => t.into(),
                Align::Center => t
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Center)
                    .into(),
            }
        }

        Node::IconLine { text: line, color, .. } => row![
            text("●").size(12).color(ctx.palette.color(*color)),
            text(line.clone()).size(14).color(ctx.palette.text),
        ]
        .spacing(8)
        .align_y(Alignment::Center)
        .into(),

        Node::SectionHeading { text: title, marker } => column![
            row![
                container(Space::with_width(0))
                    .width(12)
                    .height(12)
                    .style(fill_style(ctx.palette.color(*marker))),
                text(title.clone()).size(16).font(bold()).color(ctx.palette.text),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
            horizontal_rule(1),
        ]
        .spacing(4)
        .into(),

        Node::Avatar { initials, diameter } => {
            let d = *diameter as f32;
            let inner: Element<Message> = match ctx.slots.handle(Slot::Profile) {
                Some(handle) => iced::widget::image(handle)
                    .width(d)
                    .height(d)
                    .content_fit(iced::ContentFit::Cover)
                    .into(),
                None => {
                    let fill = ctx.palette.primary;
                    container(
                        text(initials.clone())
                            .size(d * 0.35)
                            .font(bold())
                            .color(Color::WHITE),
                    )
                    .center_x(d)
                    .center_y(d)
                    .style(move |_: &Theme| container::Style {
                        background: Some(Background::Color(fill.into())),
                        border: Border { radius: (d / 2.0).into(), ..Border::default() },
                        ..container::Style::default()
                    })
                    .into()
                }
            };
            container(inner).center_x(Length::Fill).into()
        }

        Node::ProjectGrid { captions, .. } => {
            let mut grid = row![].spacing(10);
            for (index, project) in PROJECTS.iter().enumerate() {
                let thumb: Element<Message> = match ctx.slots.handle(work_slot(index)) {
                    Some(handle) => iced::widget::image(handle)
                        .width(Length::Fill)
                        .height(110)
                        .content_fit(iced::ContentFit::Cover)
                        .into(),
                    None => placeholder_thumb(ctx, index, 0.0, 110.0),
                };

                let mut cell = column![thumb].spacing(4);
                if *captions {
                    cell = cell.push(
                        text(project.title).size(11).color(ctx.palette.text_muted),
                    );
                }

                grid = grid.push(
                    mouse_area(container(cell).width(Length::FillPortion(1)))
                        .on_press(Message::ProjectSelected(index)),
                );
            }
            grid.into()
        }

        Node::Qr { size, .. } => {
            let edge = *size as f32;
            let inner: Element<Message> = match ctx.qr {
                Some(handle) => iced::widget::image(handle.clone())
                    .width(edge)
                    .height(edge)
                    .into(),
                None => text("QR unavailable").size(12).into(),
            };
            container(container(inner).padding(8).style(fill_style(Rgb::hex(0xffffff))))
                .center_x(Length::Fill)
                .into()
        }

        Node::Spacer(h) => Space::with_height(*h).into(),

        Node::Rule => horizontal_rule(1).into(),
    }
}

/// Placeholder project art: the same brand-color blend the exporter paints.
fn placeholder_thumb(ctx: &Ctx, index: usize, width: f32, height: f32) -> Element<'static, Message> {
    let fill = ctx
        .palette
        .primary
        .mix(ctx.palette.secondary, index as f32 / 2.0);
    let label = PROJECTS[index].title.split(" - ").next().unwrap_or("").to_string();

    let inner = container(text(label).size(12).color(Color::WHITE))
        .height(height)
        .center_x(if width > 0.0 {
            Length::Fixed(width)
        } else {
            Length::Fill
        })
        .center_y(height)
        .style(fill_style(fill));
    inner.into()
}

fn work_slot(index: usize) -> Slot {
    match index {
        0 => Slot::Work1,
        1 => Slot::Work2,
        _ => Slot::Work3,
    }
}

fn bold() -> Font {
    Font {
        weight: iced::font::Weight::Bold,
        ..Font::DEFAULT
    }
}

/// Solid-fill container style with soft corners.
fn fill_style(fill: Rgb) -> impl Fn(&Theme) -> container::Style {
    move |_| container::Style {
        background: Some(Background::Color(fill.into())),
        border: Border { radius: 6.0.into(), ..Border::default() },
        ..container::Style::default()
    }
}

/// The theme's header gradient as an iced background, swept left to right.
fn gradient_bg(gradient: Gradient) -> Background {
    let mut linear = iced::gradient::Linear::new(Radians(std::f32::consts::FRAC_PI_2));
    let last = (gradient.stops.len().saturating_sub(1)).max(1) as f32;
    for (i, stop) in gradient.stops.iter().enumerate() {
        linear = linear.add_stop(i as f32 / last, (*stop).into());
    }
    Background::Gradient(iced::Gradient::Linear(linear))
}
