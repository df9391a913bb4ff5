//! Scaffold demo pages and tweet fixtures in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing vitrine...");

    let pages_dir = Path::new("pages");

    if pages_dir.exists() {
        if !yes {
            tracing::warn!("pages/ directory already exists. Use --yes to overwrite.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(pages_dir).context("Failed to create pages directory")?;
    }

    let config_path = Path::new("embeds.toml");
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG).context("Failed to write embeds.toml")?;
        tracing::info!("Created embeds.toml");
    }

    let index_path = pages_dir.join("index.md");
    if !index_path.exists() || yes {
        fs::write(&index_path, DEFAULT_INDEX).context("Failed to write index.md")?;
        tracing::info!("Created pages/index.md");
    }

    let isolation_path = pages_dir.join("isolation.md");
    if !isolation_path.exists() || yes {
        fs::write(&isolation_path, DEFAULT_ISOLATION).context("Failed to write isolation.md")?;
        tracing::info!("Created pages/isolation.md");
    }

    let fixtures_dir = Path::new("fixtures");
    if !fixtures_dir.exists() {
        fs::create_dir_all(fixtures_dir).context("Failed to create fixtures directory")?;
    }

    for (name, json) in [
        ("standard", FIXTURE_STANDARD),
        ("reply", FIXTURE_REPLY),
        ("quote", FIXTURE_QUOTE),
        ("long", FIXTURE_LONG),
    ] {
        let path = fixtures_dir.join(format!("{}.json", name));
        if !path.exists() || yes {
            fs::write(&path, json)
                .with_context(|| format!("Failed to write fixtures/{}.json", name))?;
            tracing::info!("Created fixtures/{}.json", name);
        }
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'vitrine dev' to start the development server.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Vitrine Configuration

[pages]
# Source directory for demo pages
dir = "pages"

[fixtures]
# Directory containing tweet fixture JSON
dir = "fixtures"

[build]
# Output directory for the built site
output = "dist"

# Enable minification
minify = true

# Site title
title = "vitrine demos"

# Base URL (for deployment)
base_url = "/"
"#;

const DEFAULT_INDEX: &str = r#"---
title: Gallery
order: 1
description: Every fixture rendered in the page flow.
---

# Tweet Gallery

Embeds render inline by default and pick up the page theme.

## Standard

```tweet
standard
```

## Reply

```tweet
reply
```

## Quote

```tweet
quote
```

## Long text, forced dark

```tweet theme=dark
long
```
"#;

const DEFAULT_ISOLATION: &str = r#"---
title: Isolation
order: 2
description: The same embeds inside style-isolation boundaries.
---

# Style Isolation

Isolated embeds clone the document's stylesheets into a shadow boundary,
so page CSS cannot leak into the card and card CSS cannot leak out.

## Isolated, auto theme

```tweet isolated
standard
```

## Isolated, forced light

```tweet isolated theme=light
quote
```

## Missing fixture with a fallback

```tweet isolated
does-not-exist
fallback: This one was deleted.
```
"#;

const FIXTURE_STANDARD: &str = r#"{
  "id_str": "standard",
  "text": "Just deployed to production. This is a standard tweet showing the embed card in the demo gallery.",
  "created_at": "2023-03-21T20:50:14.000Z",
  "favorite_count": 100,
  "conversation_count": 10,
  "user": {
    "name": "Vitrine",
    "screen_name": "vitrine",
    "profile_image_url_https": "https://pbs.twimg.com/profile_images/vitrine_normal.png",
    "is_blue_verified": true
  }
}
"#;

const FIXTURE_REPLY: &str = r#"{
  "id_str": "reply",
  "text": "Replying to ourselves! This tweet demonstrates the reply indicator above the card body.",
  "created_at": "2023-03-21T21:02:33.000Z",
  "favorite_count": 42,
  "conversation_count": 3,
  "in_reply_to_screen_name": "vitrine",
  "user": {
    "name": "Vitrine",
    "screen_name": "vitrine",
    "profile_image_url_https": "https://pbs.twimg.com/profile_images/vitrine_normal.png",
    "is_blue_verified": true
  }
}
"#;

const FIXTURE_QUOTE: &str = r#"{
  "id_str": "quote",
  "text": "This tweet quotes another tweet. Notice the quoted container style and clean borders.",
  "created_at": "2023-03-22T09:15:00.000Z",
  "favorite_count": 250,
  "conversation_count": 18,
  "user": {
    "name": "Vitrine",
    "screen_name": "vitrine",
    "profile_image_url_https": "https://pbs.twimg.com/profile_images/vitrine_normal.png",
    "is_blue_verified": true
  },
  "quoted_tweet": {
    "id_str": "quoted-inner",
    "text": "I am the quoted tweet! I should appear inside a bordered box.",
    "created_at": "2023-03-20T11:30:00.000Z",
    "user": {
      "name": "Nested",
      "screen_name": "nested",
      "profile_image_url_https": "https://pbs.twimg.com/profile_images/nested_normal.png"
    }
  }
}
"#;

const FIXTURE_LONG: &str = r#"{
  "id_str": "long",
  "text": "This is a much longer tweet to test how the text wraps and how the layout handles larger blocks of content. We want to ensure the typography remains readable and the spacing stays consistent across both themes, with #hashtags and links to https://example.com in the middle of the flow.",
  "created_at": "2023-03-23T14:45:10.000Z",
  "favorite_count": 7,
  "conversation_count": 1,
  "entities": {
    "hashtags": [{ "indices": [216, 225], "text": "hashtags" }],
    "urls": [
      {
        "indices": [239, 258],
        "url": "https://t.co/abc123",
        "display_url": "example.com",
        "expanded_url": "https://example.com"
      }
    ]
  },
  "user": {
    "name": "Vitrine",
    "screen_name": "vitrine",
    "profile_image_url_https": "https://pbs.twimg.com/profile_images/vitrine_normal.png"
  }
}
"#;
