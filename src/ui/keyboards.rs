//! Reply and inline keyboards

use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
};
use crate::models::content::{Category, Story, StorySummary};
use crate::models::settings::{AccessPolicy, SettingKey};
use crate::utils::helpers::{channel_link, truncate_text};
use super::callback::CallbackData;
use super::menu::MenuCommand;

const BUTTON_TITLE_LIMIT: usize = 48;

fn reply_keyboard(rows: &[&[MenuCommand]]) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = rows
        .iter()
        .map(|row| row.iter().map(|command| KeyboardButton::new(command.label())).collect())
        .collect();

    KeyboardMarkup::new(rows).resize_keyboard()
}

fn callback_button(label: impl Into<String>, data: CallbackData) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label, data.to_string())
}

/// Main menu shown to approved users
pub fn user_menu() -> KeyboardMarkup {
    reply_keyboard(&[
        &[MenuCommand::Categories],
        &[MenuCommand::About, MenuCommand::Contact],
    ])
}

pub fn admin_panel() -> KeyboardMarkup {
    reply_keyboard(&[
        &[MenuCommand::Users, MenuCommand::ManageCategories],
        &[MenuCommand::ManageStories, MenuCommand::Settings],
        &[MenuCommand::Statistics, MenuCommand::UserMode],
    ])
}

pub fn users_menu() -> KeyboardMarkup {
    reply_keyboard(&[
        &[MenuCommand::ListUsers, MenuCommand::PendingRequests],
        &[MenuCommand::DeleteUser],
        &[MenuCommand::Back],
    ])
}

pub fn categories_menu() -> KeyboardMarkup {
    reply_keyboard(&[
        &[MenuCommand::ListCategories],
        &[MenuCommand::AddCategory, MenuCommand::DeleteCategory],
        &[MenuCommand::Back],
    ])
}

pub fn stories_menu() -> KeyboardMarkup {
    reply_keyboard(&[
        &[MenuCommand::ListStories],
        &[MenuCommand::AddStory, MenuCommand::DeleteStory],
        &[MenuCommand::Back],
    ])
}

pub fn settings_menu() -> KeyboardMarkup {
    reply_keyboard(&[
        &[MenuCommand::EditWelcome, MenuCommand::EditAbout],
        &[MenuCommand::EditContact, MenuCommand::EditStartButton],
        &[MenuCommand::AccessRules, MenuCommand::SetChannel],
        &[MenuCommand::Back],
    ])
}

/// Shown while an admin wizard waits for input
pub fn cancel_keyboard() -> KeyboardMarkup {
    reply_keyboard(&[&[MenuCommand::Cancel]])
}

/// Single configurable start button
pub fn start_keyboard(label: &str) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(label)]]).resize_keyboard()
}

/// Decision controls attached to the admin's join request notification
pub fn join_request_controls(user_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            callback_button("✅ Approve", CallbackData::Approve(user_id)),
            callback_button("❌ Reject", CallbackData::Reject(user_id)),
        ],
        vec![callback_button("🌟 Approve as premium", CallbackData::ApprovePremium(user_id))],
    ])
}

/// Channel link (for public channels) and the re-check button
pub fn subscription_prompt(channel: &str) -> InlineKeyboardMarkup {
    let mut rows = Vec::new();

    if let Some(link) = channel_link(channel).and_then(|link| url::Url::parse(&link).ok()) {
        rows.push(vec![InlineKeyboardButton::url("📢 Open channel", link)]);
    }
    rows.push(vec![callback_button("🔄 Check subscription", CallbackData::CheckSubscription)]);

    InlineKeyboardMarkup::new(rows)
}

pub fn category_list(categories: &[Category]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        categories
            .iter()
            .map(|category| vec![callback_button(category.name.clone(), CallbackData::Category(category.id))]),
    )
}

/// Story titles of one category; premium stories are marked
pub fn story_list(stories: &[Story]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = stories
        .iter()
        .map(|story| {
            let title = truncate_text(&story.title, BUTTON_TITLE_LIMIT);
            let label = if story.is_premium { format!("🌟 {}", title) } else { title };
            vec![callback_button(label, CallbackData::Story(story.id))]
        })
        .collect();
    rows.push(vec![callback_button("🔙 Categories", CallbackData::Home)]);

    InlineKeyboardMarkup::new(rows)
}

/// Back navigation under a story
pub fn story_footer(category_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        callback_button("🔙 Stories", CallbackData::Category(category_id)),
        callback_button("🏠 Categories", CallbackData::Home),
    ]])
}

/// Category picker of the add-story wizard
pub fn pick_category(categories: &[Category]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        categories
            .iter()
            .map(|category| vec![callback_button(category.name.clone(), CallbackData::PickCategory(category.id))]),
    )
}

pub fn premium_choice() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        callback_button("🌟 Premium", CallbackData::Premium(true)),
        callback_button("📖 Regular", CallbackData::Premium(false)),
    ]])
}

pub fn delete_category_picker(categories: &[Category]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        categories
            .iter()
            .map(|category| vec![callback_button(format!("🗑 {}", category.name), CallbackData::DeleteCategory(category.id))]),
    )
}

pub fn delete_story_picker(stories: &[StorySummary]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(stories.iter().map(|story| {
        let label = format!("🗑 {} ({})", truncate_text(&story.title, BUTTON_TITLE_LIMIT), story.category_name);
        vec![callback_button(label, CallbackData::DeleteStory(story.id))]
    }))
}

/// On/off switches for the access rules
pub fn access_toggles(policy: &AccessPolicy) -> InlineKeyboardMarkup {
    let toggle = |key: SettingKey, label: &str, enabled: bool| {
        let mark = if enabled { "✅" } else { "❌" };
        vec![callback_button(format!("{} {}", mark, label), CallbackData::Toggle(key))]
    };

    InlineKeyboardMarkup::new(vec![
        toggle(SettingKey::ApprovalRequired, "Approval required", policy.approval_required),
        toggle(SettingKey::AutoApprove, "Auto-approve", policy.auto_approve),
        toggle(SettingKey::SubscriptionRequired, "Subscription required", policy.subscription_required),
    ])
}
