use scavenger_hunt_core::catalog::HuntListing;
use scavenger_hunt_core::identifiers::HuntIdentifier;
use scavenger_hunt_core::session::{ClueView, HuntView};

pub fn print_listings(listings: &[HuntListing], selected: Option<&HuntIdentifier>) {
    if listings.is_empty() {
        println!("No scavenger hunts available.");
        return;
    }

    for listing in listings {
        let marker = if selected == Some(&listing.id) { "*" } else { " " };
        println!(
            "{} {:<12} {} ({}/{} completed)",
            marker,
            listing.id.as_str(),
            listing.title,
            listing.progress.completed,
            listing.progress.total
        );
        println!("    {}", listing.description);
    }
}

pub fn print_hunt(view: &HuntView<'_>) {
    println!("{}", view.title);
    println!("{}", view.description);
    if let Some(image) = view.image {
        println!("[image: {}]", image);
    }
    println!();
    println!("{} ({:.0}%)", view.progress_text(), view.percentage);
    println!();

    for clue in &view.clues {
        let mark = if clue.completed { "x" } else { " " };
        println!("  [{}] {}. {}", mark, clue.index + 1, clue.title);
    }
}

pub fn print_clue(view: Option<&ClueView<'_>>) {
    let Some(view) = view else {
        return;
    };

    println!("Clue {}: {}", view.index + 1, view.title);
    if let Some(description) = view.description {
        println!("  {}", description);
    }
    if let Some(image) = view.image {
        println!("  [image: {}]", image);
    }
    if let Some(target) = view.map_target {
        println!("  [map: {:.6}, {:.6}]", target.latitude(), target.longitude());
    }

    if let Some(message) = &view.status_message {
        println!();
        println!("{}", message);
    }

    if let Some(answer) = &view.answer {
        println!();
        println!("Answer: {}", answer.title);
        println!("  {}", answer.description);
        if let Some(image) = answer.image {
            println!("  [image: {}]", image);
        }
    }
}
