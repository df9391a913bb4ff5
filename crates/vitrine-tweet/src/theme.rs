//! The widget theme stylesheet.

/// CSS for the tweet widgets.
///
/// Custom properties default to the light palette and are overridden for
/// `[data-theme="dark"]` ancestors, `:host([data-theme="dark"])` boundaries,
/// and the system dark preference. Demo shells install this into the host
/// document so the snapshot cloner carries it into isolation boundaries.
pub fn theme_css() -> &'static str {
    THEME_CSS
}

const THEME_CSS: &str = r#"
.vitrine-tweet {
  --tweet-bg: #ffffff;
  --tweet-color: #0f1419;
  --tweet-color-secondary: #536471;
  --tweet-border: #cfd9de;
  --tweet-link: #1d9bf0;
  --tweet-verified: #1d9bf0;
  --tweet-font: -apple-system, system-ui, "Segoe UI", sans-serif;
}

@media (prefers-color-scheme: dark) {
  .vitrine-tweet {
    --tweet-bg: #15202b;
    --tweet-color: #f7f9f9;
    --tweet-color-secondary: #8b98a5;
    --tweet-border: #425364;
  }
}

[data-theme="light"] .vitrine-tweet {
  --tweet-bg: #ffffff;
  --tweet-color: #0f1419;
  --tweet-color-secondary: #536471;
  --tweet-border: #cfd9de;
}

[data-theme="dark"] .vitrine-tweet,
:host([data-theme="dark"]) .vitrine-tweet {
  --tweet-bg: #15202b;
  --tweet-color: #f7f9f9;
  --tweet-color-secondary: #8b98a5;
  --tweet-border: #425364;
}

.vitrine-tweet {
  position: relative;
  max-width: 550px;
  margin: 0 auto;
  padding: 1rem;
  font-family: var(--tweet-font);
  background: var(--tweet-bg);
  color: var(--tweet-color);
  border: 1px solid var(--tweet-border);
  border-radius: 12px;
}

.vitrine-tweet a {
  color: var(--tweet-link);
  text-decoration: none;
}

.vitrine-tweet .tweet-overlay {
  position: absolute;
  inset: 0;
  border-radius: 12px;
}

.vitrine-tweet .tweet-header {
  display: flex;
  align-items: center;
  gap: 0.5rem;
}

.vitrine-tweet .tweet-avatar {
  width: 48px;
  height: 48px;
  border-radius: 50%;
}

.vitrine-tweet .tweet-name {
  font-weight: 700;
}

.vitrine-tweet .tweet-verified {
  color: var(--tweet-verified);
  margin-left: 0.125rem;
}

.vitrine-tweet .tweet-screen-name,
.vitrine-tweet .tweet-replying-to,
.vitrine-tweet .tweet-footer {
  color: var(--tweet-color-secondary);
  font-size: 0.9375rem;
}

.vitrine-tweet .tweet-body {
  margin: 0.75rem 0 0;
  font-size: 1.25rem;
  line-height: 1.5;
  white-space: pre-wrap;
  overflow-wrap: break-word;
}

.vitrine-tweet .tweet-quoted {
  margin-top: 0.75rem;
  padding: 0.75rem;
  border: 1px solid var(--tweet-border);
  border-radius: 12px;
}

.vitrine-tweet .tweet-quoted .tweet-body {
  font-size: 1rem;
}

.vitrine-tweet .tweet-footer {
  display: flex;
  gap: 1rem;
  margin-top: 0.75rem;
}

.vitrine-tweet-skeleton {
  max-width: 550px;
  margin: 0 auto;
  padding: 1rem;
  border: 1px solid var(--tweet-border, #cfd9de);
  border-radius: 12px;
}

.vitrine-tweet-skeleton .skeleton-bar {
  height: 1rem;
  margin-bottom: 0.5rem;
  border-radius: 4px;
  background: var(--tweet-border, #cfd9de);
  animation: vitrine-pulse 1.5s ease-in-out infinite;
}

@keyframes vitrine-pulse {
  0%, 100% { opacity: 1; }
  50% { opacity: 0.4; }
}
"#;
