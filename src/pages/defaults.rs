// src/pages/defaults.rs

use sqlx::SqlitePool;
use tracing::info;

use super::models::DefaultPage;
use crate::common::{generate_id, now_timestamp, ApiError, EntityPrefix};

pub const DEFAULT_PAGES: [DefaultPage; 6] = [
    DefaultPage {
        slug: "privacy-policy",
        title: "Privacy Policy",
        meta_description: "How TalentD collects, uses and protects your personal information.",
        content: r#"<h1>Privacy Policy</h1>
<h2>Information we collect</h2>
<p>Account details from Google sign-in, the content you save or apply to, and resumes you upload for analysis.</p>
<h2>How we use it</h2>
<ul>
<li>To run your account and show your saved items</li>
<li>To score and parse resumes you submit</li>
<li>To improve the listings we publish</li>
</ul>
<h2>Your rights</h2>
<p>You can ask us to export or delete your data at any time.</p>
<p>Questions: privacy@talentd.com</p>"#,
    },
    DefaultPage {
        slug: "terms-of-service",
        title: "Terms of Service",
        meta_description: "The rules for using the TalentD platform.",
        content: r#"<h1>Terms of Service</h1>
<h2>Using TalentD</h2>
<p>By using TalentD you agree to these terms. Keep your account information accurate and your credentials private.</p>
<h2>Prohibited activity</h2>
<ul>
<li>Posting false or misleading information</li>
<li>Scraping content with automated tools</li>
</ul>
<h2>Disclaimer</h2>
<p>Listings are provided as is. TalentD does not guarantee placement outcomes.</p>
<p>Questions: legal@talentd.com</p>"#,
    },
    DefaultPage {
        slug: "support",
        title: "Support & Help",
        meta_description: "Answers to common questions and ways to reach the TalentD team.",
        content: r#"<h1>Support &amp; Help</h1>
<h2>Frequently asked questions</h2>
<h3>How do I apply for a job?</h3>
<p>Open a listing and use the Apply button. Your applications stay recorded on your account.</p>
<h3>How does the resume reviewer work?</h3>
<p>Upload a PDF, DOCX or text resume and receive an ATS score with suggestions.</p>
<h3>When can I see a DSA solution?</h3>
<p>After your first attempt at the problem.</p>
<h2>Contact</h2>
<p>Email support@talentd.com. We usually reply within 24 hours.</p>"#,
    },
    DefaultPage {
        slug: "about",
        title: "About Us",
        meta_description: "TalentD connects students and professionals with jobs, internships and learning resources.",
        content: r#"<h1>About TalentD</h1>
<p>TalentD is a career platform for students and early professionals. We curate jobs and internships, publish career articles and learning roadmaps, and host DSA practice problems.</p>
<h2>What we offer</h2>
<ul>
<li>Verified job and internship listings</li>
<li>Resume analysis and portfolio generation</li>
<li>Interview preparation through DSA Corner</li>
</ul>"#,
    },
    DefaultPage {
        slug: "careers",
        title: "Careers at TalentD",
        meta_description: "Join the team building TalentD.",
        content: r#"<h1>Careers at TalentD</h1>
<p>We are a small remote-first team helping people start their careers.</p>
<h2>Open roles</h2>
<p>We have no open roles right now. Send your resume to careers@talentd.com and we will reach out when something fits.</p>"#,
    },
    DefaultPage {
        slug: "contact",
        title: "Contact Us",
        meta_description: "Get in touch with the TalentD team.",
        content: r#"<h1>Contact Us</h1>
<ul>
<li><strong>General:</strong> hello@talentd.com</li>
<li><strong>Support:</strong> support@talentd.com</li>
<li><strong>Partnerships:</strong> partners@talentd.com</li>
</ul>
<p>Business hours: Monday to Friday, 9 AM to 6 PM IST.</p>"#,
    },
];

/// Inserts the default pages whose slug is not taken yet. Returns how many were added.
pub async fn ensure_default_pages(pool: &SqlitePool) -> Result<usize, ApiError> {
    let now = now_timestamp();
    let mut created = 0;

    for page in DEFAULT_PAGES.iter() {
        let result = sqlx::query(
            r#"INSERT OR IGNORE INTO pages (id, slug, title, content, meta_description, status, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, 'published', ?, ?)"#,
        )
        .bind(generate_id(EntityPrefix::Page))
        .bind(page.slug)
        .bind(page.title)
        .bind(page.content)
        .bind(page.meta_description)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await
        .map_err(ApiError::DatabaseError)?;

        created += result.rows_affected() as usize;
    }

    if created > 0 {
        info!(created, "Default footer pages seeded");
    }
    Ok(created)
}
