//! Escalating persuasion lines
//!
//! Index 0 is the subtitle shown before any rejection; each "No" moves one
//! line further. Past the end, the last line repeats.

/// Subtitle lines, in escalation order
pub const MESSAGES: [&str; 31] = [
    "You're the purr-fect one for me!\nMy heart beats only for you.",
    "Are you sure? 🥺",
    "Pretty please? 💕",
    "Think again... 🤔",
    "I'll be really sad 😢",
    "You're breaking my heart 💔",
    "But I made this for you! 🎁",
    "Just say yes already! 😭",
    "I'll give you chocolates 🍫",
    "And flowers too! 🌹",
    "I promise to be the best! ✨",
    "Don't make the kitty cry 😿",
    "My heart only beats for you 💓",
    "You're the purr-fect one! 🐱",
    "Say yes and I'll stop bugging you 🐛",
    "I'll cook your favorite meal 🍝",
    "I'll watch whatever you want 📺",
    "Even horror movies 👻",
    "I'll carry your bags while shopping 🛍️",
    "Unlimited cuddles included 🤗",
    "Plus forehead kisses 😘",
    "I'll share my dessert with you 🍰",
    "That's how serious I am! 🫡",
    "You're running out of excuses! 😏",
    "The Yes button is RIGHT THERE ➡️",
    "It's getting bigger, can you see it? 👀",
    "Resistance is futile 🤖",
    "Just one little click! ☝️",
    "You know you want to... 😉",
    "Last chance... 🥹",
    "Okay fine, but I still like you 💗",
];

/// Number of subtitle lines
pub const MESSAGE_COUNT: usize = MESSAGES.len();

/// Message for an index, clamped to the last line
pub fn message(index: usize) -> &'static str {
    MESSAGES[index.min(MESSAGE_COUNT - 1)]
}

/// Visual lines of a message (the shell joins them with `<br>`)
pub fn lines(index: usize) -> impl Iterator<Item = &'static str> {
    message(index).split('\n')
}
