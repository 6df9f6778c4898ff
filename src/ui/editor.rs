/// The editor form
///
/// Text inputs for every content field, the theme and layout pickers, the
/// dark mode toggle, image slot pickers and the draft buttons. Every widget
/// maps straight to one message; no state lives here.

use iced::widget::{button, column, container, row, scrollable, text, text_input, toggler, Column, Row, Space};
use iced::{Alignment, Border, Color, Element, Length, Theme};

use crate::flyer::layout::{LayoutInfo, LAYOUTS};
use crate::state::content::{Field, FlyerContent};
use crate::state::images::{ImageSlots, Preview, Slot};
use crate::state::selection::SelectionState;
use crate::theme::{FlyerTheme, THEMES};
use crate::Message;

/// Build the whole editor view.
pub fn view<'a>(
    content: &'a FlyerContent,
    slots: &'a ImageSlots,
    selection: &'a SelectionState,
    status: &'a str,
) -> Element<'a, Message> {
    let personal = column![
        heading("Personal Information"),
        field_input("Full Name", &content.name, Field::Name),
        field_input("Professional Title", &content.title, Field::Title),
        field_input("Bio", &content.bio, Field::Bio),
        field_input("Call to Action", &content.cta, Field::Cta),
    ]
    .spacing(8);

    let contact = column![
        heading("Contact & Social"),
        field_input("Phone", &content.phone, Field::Phone),
        field_input("Email", &content.email, Field::Email),
        field_input("Location", &content.location, Field::Location),
        field_input("Instagram", &content.instagram, Field::Instagram),
        field_input("Twitter", &content.twitter, Field::Twitter),
        field_input("GitHub", &content.github, Field::Github),
    ]
    .spacing(8);

    let services = content.services.iter().enumerate().fold(
        column![heading("Services Offered")].spacing(8),
        |col, (index, service)| {
            col.push(
                text_input("Service description", service)
                    .on_input(move |value| Message::ServiceChanged(index, value))
                    .padding(8)
                    .size(14),
            )
        },
    );

    let images = Slot::ALL
        .iter()
        .fold(column![heading("Images")].spacing(8), |col, slot| {
            col.push(slot_row(slots, *slot))
        });

    let themes = THEMES.iter().fold(
        row![].spacing(8),
        |r: Row<'a, Message>, theme| r.push(swatch(theme, theme.id == selection.theme_id)),
    );

    let layouts = LAYOUTS.iter().fold(
        row![].spacing(8),
        |r: Row<'a, Message>, info| r.push(layout_button(info, info.id == selection.layout)),
    );

    let actions = row![
        button(text("Save Draft").size(14))
            .padding(10)
            .on_press(Message::SaveDraft),
        button(text("Load Draft").size(14))
            .padding(10)
            .on_press(Message::LoadDraft),
        Space::with_width(Length::Fill),
        button(text("Preview Flyer →").size(14))
            .padding(10)
            .style(button::primary)
            .on_press(Message::ShowPreview),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let form: Column<Message> = column![
        text("Flyer Studio").size(32),
        text("Fill in your details, pick a look, then preview and export.").size(14),
        personal,
        contact,
        services,
        images,
        heading("Color Theme"),
        themes,
        heading("Layout"),
        layouts,
        toggler(selection.dark_mode)
            .label("Dark Mode")
            .on_toggle(Message::DarkModeToggled),
        actions,
        text(status).size(13),
    ]
    .spacing(16)
    .max_width(720);

    scrollable(
        container(form)
            .padding(28)
            .center_x(Length::Fill),
    )
    .into()
}

fn heading(label: &str) -> Element<'_, Message> {
    text(label).size(18).into()
}

fn field_input<'a>(label: &'a str, value: &str, field: Field) -> Element<'a, Message> {
    column![
        text(label).size(13),
        text_input(label, value)
            .on_input(move |v| Message::FieldChanged(field, v))
            .padding(8)
            .size(14),
    ]
    .spacing(4)
    .into()
}

/// One image slot: label, file picker, and the current preview state.
fn slot_row(slots: &ImageSlots, slot: Slot) -> Element<'_, Message> {
    let state: Element<Message> = match slots.preview(slot) {
        Preview::Empty => text("No file selected").size(13).into(),
        Preview::Pending => text("⏳ Decoding…").size(13).into(),
        Preview::Ready(p) => iced::widget::image(p.handle.clone())
            .width(48)
            .height(48)
            .into(),
        Preview::Failed(reason) => text(format!("⚠️ {}", reason)).size(13).into(),
    };

    row![
        text(slot.label()).size(14).width(140),
        button(text("Choose File").size(13))
            .padding(6)
            .on_press(Message::PickImage(slot)),
        state,
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

/// Theme swatch: a button filled with the theme's primary color.
fn swatch<'a>(theme: &'static FlyerTheme, selected: bool) -> Element<'a, Message> {
    let fill: Color = theme.primary.into();
    let label = if selected {
        format!("✓ {}", theme.name)
    } else {
        theme.name.to_string()
    };

    button(text(label).size(13))
        .padding(8)
        .on_press(Message::ThemePicked(theme.id))
        .style(move |_theme: &Theme, _status| button::Style {
            background: Some(iced::Background::Color(fill)),
            text_color: Color::WHITE,
            border: Border {
                color: if selected { Color::WHITE } else { Color::TRANSPARENT },
                width: if selected { 2.0 } else { 0.0 },
                radius: 6.0.into(),
            },
            ..button::Style::default()
        })
        .into()
}

fn layout_button<'a>(info: &'static LayoutInfo, selected: bool) -> Element<'a, Message> {
    let style = if selected { button::primary } else { button::secondary };
    button(text(format!("{} {}", info.icon, info.name)).size(13))
        .padding(8)
        .style(style)
        .on_press(Message::LayoutPicked(info.id))
        .into()
}
