//! Marketing landing page.
//!
//! Serves the landing page at `/`: hero, waitlist form, founding-cohort
//! progress bar, feature highlights, security claims, pricing, and footer.
//! The same renderer redraws the page with an inline notice when a form
//! submission fails.

use axum::Router;
use axum::extract::State;
use axum::http::Uri;
use axum::response::Html;
use axum::routing::get;
use std::sync::Arc;

use crate::routes::escape_html;
use crate::state::AppState;

/// Build the landing page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(landing_page))
}

async fn landing_page(State(state): State<Arc<AppState>>, uri: Uri) -> Html<String> {
    let page = page_of(&uri);
    let count = state.display_count().await;
    Html(render(
        &state,
        count,
        &FormView {
            email: "",
            page: &page,
            notice: None,
        },
    ))
}

/// Path and query of a request, as submitted back in the form's `page` field.
pub(crate) fn page_of(uri: &Uri) -> String {
    uri.path_and_query()
        .map_or_else(|| "/".to_owned(), |pq| pq.as_str().to_owned())
}

/// What the waitlist form should show.
pub(crate) struct FormView<'a> {
    /// Value to pre-fill into the email input.
    pub email: &'a str,
    /// Path and query of the page hosting the form.
    pub page: &'a str,
    /// Inline notice above the form (failed submission).
    pub notice: Option<&'a str>,
}

/// Render the full landing page.
pub(crate) fn render(state: &AppState, count: u64, form: &FormView<'_>) -> String {
    let percent = state.meter.percent(count);
    let display = state.meter.display_percent(count);

    let mut html = String::with_capacity(40960);
    html.push_str(
        &LANDING_HEAD
            .replace("{{SITE_URL}}", &escape_html(&state.site.site_url)),
    );
    let body = LANDING_BODY
        .replace("{{PROGRESS_WIDTH}}", &format!("{percent:.2}"))
        .replace("{{PROGRESS_DISPLAY}}", &display.to_string())
        .replace("{{COHORT_LIMIT}}", &state.meter.cohort_limit().to_string())
        .replace("{{CONTACT_EMAIL}}", &escape_html(&state.site.contact_email))
        .replace("{{WAITLIST_FORM}}", &waitlist_form(form));
    html.push_str(&body);
    html
}

/// Render the waitlist form. Each render gets a fresh form id.
fn waitlist_form(view: &FormView<'_>) -> String {
    let form_id = uuid::Uuid::new_v4();

    let mut s = String::with_capacity(1024);
    if let Some(notice) = view.notice {
        s.push_str(r#"<div class="form-notice" role="alert">"#);
        s.push_str(&escape_html(notice));
        s.push_str("</div>");
    }
    s.push_str(r#"<form class="waitlist-form" method="post" action="/waitlist">"#);
    s.push_str(r#"<input type="hidden" name="form_id" value=""#);
    s.push_str(&form_id.to_string());
    s.push_str(r#""/><input type="hidden" name="page" value=""#);
    s.push_str(&escape_html(view.page));
    s.push_str(r#""/><input type="email" name="email" placeholder="Enter your email" required autocomplete="email" value=""#);
    s.push_str(&escape_html(view.email));
    s.push_str(r#""/><button type="submit" class="btn-join"><span class="spinner" aria-hidden="true"></span><span class="label">Get Early Access</span></button></form>"#);
    s
}

/// Document head: metadata, Open Graph, Twitter card, styles.
const LANDING_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en" class="scroll-smooth"><head><meta charset="utf-8"/><meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>Unstra | AI Contract Review &amp; Red Flag Detection</title>
<meta name="description" content="Know exactly what you're signing. Unstra uses legal-grade AI to find red flags in leases and contracts."/>
<link rel="canonical" href="{{SITE_URL}}"/>
<link rel="icon" href="/favicon.ico"/>
<meta property="og:title" content="Unstra | AI Contract Review &amp; Red Flag Detection"/>
<meta property="og:description" content="Find red flags in your contracts instantly with legal-grade AI."/>
<meta property="og:url" content="{{SITE_URL}}"/>
<meta property="og:site_name" content="Unstra"/>
<meta property="og:locale" content="en_US"/>
<meta property="og:type" content="website"/>
<meta name="twitter:card" content="summary_large_image"/>
<meta name="twitter:title" content="Unstra | AI Contract Review"/>
<meta name="twitter:description" content="Find red flags in your contracts instantly."/>
<meta name="article:author" content="Unstra Team"/>
<meta name="article:published_time" content="2026-01-16T00:00:00Z"/>
<style>
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
:root{--bg:#F8FAFC;--ink:#0F172A;--muted:#64748B;--faint:#94A3B8;--line:#E2E8F0;--indigo:#4F46E5;--indigo-soft:#EEF2FF;--font:'Geist',-apple-system,'Segoe UI',sans-serif}
html.scroll-smooth{scroll-behavior:smooth}
body{font-family:var(--font);background:var(--bg);color:var(--ink);line-height:1.6;-webkit-font-smoothing:antialiased;overflow-x:hidden}
a{color:inherit;text-decoration:none}
.wrap{max-width:1200px;margin:0 auto;padding:0 24px}
.nav{display:flex;justify-content:space-between;align-items:center;max-width:1200px;margin:0 auto;padding:24px}
.logo{display:flex;align-items:center;gap:10px;font-size:20px;font-weight:900;letter-spacing:-1px;text-transform:uppercase}
.logo-mark{width:36px;height:36px;border-radius:12px;background:var(--indigo);color:#fff;display:flex;align-items:center;justify-content:center;font-weight:700;box-shadow:0 8px 20px rgba(79,70,229,.25)}
.nav-links{display:flex;gap:32px;font-size:14px;font-weight:700;color:var(--muted)}
.nav-links a:hover{color:var(--indigo)}
.hero{text-align:center;max-width:1200px;margin:0 auto;padding:96px 24px 80px}
.badge{display:inline-flex;align-items:center;gap:8px;padding:6px 16px;margin-bottom:32px;font-size:10px;font-weight:700;letter-spacing:.2em;color:var(--indigo);text-transform:uppercase;background:var(--indigo-soft);border:1px solid #E0E7FF;border-radius:999px}
.dot{width:8px;height:8px;border-radius:50%;background:var(--indigo);animation:ping 1.5s infinite}
@keyframes ping{0%{box-shadow:0 0 0 0 rgba(99,102,241,.6)}100%{box-shadow:0 0 0 8px rgba(99,102,241,0)}}
.hero h1{font-size:88px;font-weight:900;letter-spacing:-3px;line-height:.9;margin-bottom:24px}
.hero h1 em{color:var(--indigo)}
.hero p.lead{font-size:22px;color:var(--muted);max-width:640px;margin:0 auto 40px;font-weight:500}
.form-box{max-width:448px;margin:0 auto 40px}
.waitlist-form{display:flex;gap:12px}
.waitlist-form input[type=email]{flex:1;padding:16px 24px;border-radius:16px;border:1px solid var(--line);font-size:16px;font-family:var(--font);outline:none}
.waitlist-form input[type=email]:focus{box-shadow:0 0 0 2px var(--indigo)}
.btn-join{display:flex;align-items:center;justify-content:center;gap:8px;min-width:160px;padding:16px 32px;border:none;border-radius:16px;background:var(--ink);color:#fff;font-weight:700;font-size:15px;font-family:var(--font);cursor:pointer}
.btn-join:hover{background:#1E293B}
.btn-join:disabled{opacity:.7;cursor:wait}
.btn-join .spinner{display:none;width:18px;height:18px;border:3px solid rgba(255,255,255,.3);border-top-color:#fff;border-radius:50%;animation:spin .8s linear infinite}
.btn-join.loading .spinner{display:inline-block}
@keyframes spin{to{transform:rotate(360deg)}}
.form-notice{margin-bottom:12px;padding:12px 16px;border-radius:12px;background:#FEF2F2;border:1px solid #FECACA;color:#991B1B;font-size:14px;font-weight:600}
.meter{max-width:320px;margin:0 auto}
.meter-head{display:flex;justify-content:space-between;align-items:flex-end;margin-bottom:8px;font-size:10px;font-weight:900;letter-spacing:.15em;text-transform:uppercase}
.meter-head .label{color:var(--faint)}.meter-head .value{color:var(--indigo)}
.meter-track{height:6px;width:100%;background:var(--line);border-radius:999px;overflow:hidden}
.meter-fill{height:100%;background:var(--indigo);transition:width 1s ease-out}
.meter-note{margin-top:12px;font-size:10px;font-weight:700;color:var(--faint);text-transform:uppercase;letter-spacing:.1em}
.section{padding:96px 24px}
.features{max-width:1100px;margin:0 auto;border-top:1px solid #F1F5F9;display:grid;grid-template-columns:1fr 1fr;gap:80px;align-items:center}
.features h2{font-size:48px;font-weight:900;letter-spacing:-1px;line-height:1.1;margin-bottom:24px}
.features p{color:var(--muted);font-size:18px;margin-bottom:32px;font-weight:500}
.checks{list-style:none;display:grid;gap:16px}
.checks li{display:flex;align-items:center;gap:12px;font-weight:700;color:#334155}
.check{width:20px;height:20px;border-radius:50%;background:#D1FAE5;color:#059669;display:flex;align-items:center;justify-content:center;font-size:12px}
.risk-card{max-width:360px;margin:0 auto;background:#fff;border-radius:24px;border:2px solid var(--indigo-soft);box-shadow:0 25px 50px rgba(15,23,42,.15);padding:24px}
.risk-title{display:flex;align-items:center;gap:12px;margin-bottom:16px;color:#DC2626;font-size:10px;font-weight:700;letter-spacing:.15em;text-transform:uppercase}
.risk-icon{width:32px;height:32px;border-radius:8px;background:#DC2626;color:#fff;display:flex;align-items:center;justify-content:center;font-style:italic;font-family:monospace}
.risk-quote{padding:16px;border-radius:16px;background:#FEF2F2;border:1px solid #FEE2E2;margin-bottom:12px;font-size:12px;font-weight:700;font-style:italic;color:#7F1D1D}
.risk-fix{padding:16px;border-radius:16px;background:#ECFDF5;border:1px solid #D1FAE5}
.risk-fix small{display:block;font-size:10px;font-weight:700;color:#059669;text-transform:uppercase;letter-spacing:.15em;margin-bottom:4px}
.risk-fix p{font-size:12px;font-weight:700;color:#064E3B;margin:0}
.trust{background:#fff;padding:64px 24px;border-top:1px solid #F1F5F9;border-bottom:1px solid #F1F5F9;text-align:center}
.trust small{display:block;font-size:10px;font-weight:900;color:#CBD5E1;text-transform:uppercase;letter-spacing:.3em;margin-bottom:40px}
.trust-names{display:flex;flex-wrap:wrap;justify-content:center;gap:64px;font-weight:900;font-size:18px;color:var(--faint);opacity:.3}
.security{max-width:900px;margin:0 auto;text-align:center}
.security h2{font-size:36px;font-weight:900;letter-spacing:-.5px;margin-bottom:24px}
.security > p{color:var(--muted);font-size:18px;margin-bottom:40px;font-weight:500}
.claims{display:grid;grid-template-columns:repeat(3,1fr);gap:24px;text-align:left}
.claim{padding:24px;background:#fff;border-radius:16px;border:1px solid #F1F5F9}
.claim h4{font-weight:700;margin-bottom:8px}
.claim p{font-size:12px;color:var(--muted);font-weight:700}
.pricing{background:#fff;text-align:center}
.pricing h2{font-size:60px;font-weight:900;letter-spacing:-1.5px;margin-bottom:16px}
.pricing .sub{color:var(--muted);font-size:18px;margin-bottom:48px;font-weight:500}
.pass{position:relative;max-width:720px;margin:0 auto;padding:56px;border-radius:40px;border:1px solid #F1F5F9;box-shadow:0 25px 50px rgba(15,23,42,.12)}
.phase{position:absolute;top:-16px;left:50%;transform:translateX(-50%);background:var(--ink);color:#fff;padding:8px 24px;border-radius:999px;font-size:10px;font-weight:900;text-transform:uppercase;letter-spacing:.3em}
.tier{color:var(--indigo);font-size:14px;font-weight:900;text-transform:uppercase;letter-spacing:.2em;margin-bottom:16px}
.price{display:flex;justify-content:center;align-items:baseline;gap:8px;margin-bottom:32px}
.price strong{font-size:72px;font-weight:900;letter-spacing:-3px}
.price span{color:var(--faint);font-weight:700;text-transform:uppercase;font-size:12px;letter-spacing:.1em}
.perks{display:grid;gap:16px;margin:40px auto 48px;max-width:448px;text-align:left}
.perk{display:flex;align-items:center;gap:16px;padding:16px;border-radius:16px;background:var(--bg);border:1px solid #F1F5F9;font-size:14px;font-weight:700;color:#334155}
.perk i{width:24px;height:24px;border-radius:50%;background:var(--indigo);color:#fff;display:flex;align-items:center;justify-content:center;font-style:normal;font-size:12px}
.claim-btn{display:block;max-width:448px;margin:0 auto;padding:24px;background:var(--ink);color:#fff;border-radius:16px;font-weight:900;font-size:18px}
.claim-btn:hover{background:var(--indigo)}
.footer{background:#fff;padding:96px 24px 48px;border-top:1px solid #F1F5F9}
.footer-grid{max-width:1200px;margin:0 auto 80px;display:grid;grid-template-columns:5fr 2fr 2fr 3fr;gap:48px}
.footer-grid p{color:var(--muted);font-size:14px;font-weight:500;max-width:380px;margin:24px 0}
.status{display:inline-flex;align-items:center;gap:8px;padding:6px 12px;border-radius:999px;background:#ECFDF5;border:1px solid #D1FAE5;font-size:10px;font-weight:700;color:#047857;text-transform:uppercase;letter-spacing:.1em}
.status .dot{background:#10B981}
.footer h4{font-size:10px;font-weight:900;text-transform:uppercase;letter-spacing:.2em;margin-bottom:32px}
.footer ul{list-style:none;display:grid;gap:16px;font-size:14px;font-weight:700;color:var(--muted)}
.footer ul a:hover{color:var(--indigo)}
.footer-base{max-width:1200px;margin:0 auto;padding-top:48px;border-top:1px solid #F1F5F9;display:flex;justify-content:space-between;gap:32px}
.footer-base .rights{font-size:10px;font-weight:900;text-transform:uppercase;letter-spacing:.2em}
.footer-base .disclaimer{max-width:560px;text-align:right;font-size:9px;font-weight:700;color:var(--faint);text-transform:uppercase;letter-spacing:.1em;font-style:italic}
@media(max-width:900px){.hero h1{font-size:48px;letter-spacing:-1.5px}.features,.claims,.footer-grid{grid-template-columns:1fr}.waitlist-form{flex-direction:column}.footer-base{flex-direction:column}.footer-base .disclaimer{text-align:left}.nav-links{gap:16px;font-size:11px}}
</style></head>
"##;

/// Page body. `{{WAITLIST_FORM}}` is replaced with the rendered form.
const LANDING_BODY: &str = r##"<body>
<nav class="nav">
  <div class="logo"><div class="logo-mark">U</div>Unstra</div>
  <div class="nav-links">
    <a href="#features">Features</a>
    <a href="#security">Security</a>
    <a href="#pricing">Pricing</a>
  </div>
</nav>
<main class="hero">
  <div class="badge"><span class="dot"></span>Founding Member Access</div>
  <h1>Know exactly<br/><em>what you're signing.</em></h1>
  <p class="lead">AI-powered clarity for leases, employment contracts, and fine print. Find what matters, miss nothing.</p>
  <div class="form-box">{{WAITLIST_FORM}}</div>
  <div class="meter">
    <div class="meter-head"><span class="label">Founding Cohort</span><span class="value">{{PROGRESS_DISPLAY}}% Capacity</span></div>
    <div class="meter-track"><div class="meter-fill" style="width:{{PROGRESS_WIDTH}}%"></div></div>
    <p class="meter-note">Limited to first {{COHORT_LIMIT}} members</p>
  </div>
</main>
<section id="features" class="section">
  <div class="features">
    <div>
      <h2>No more "Legal Anxiety."</h2>
      <p>Our AI doesn't just read the fine print. It translates it into your language. See the risks before the ink dries.</p>
      <ul class="checks">
        <li><span class="check">&#10003;</span>Automatic Renewal Detection</li>
        <li><span class="check">&#10003;</span>Hidden Fee Identification</li>
        <li><span class="check">&#10003;</span>Termination Right Analysis</li>
      </ul>
    </div>
    <div class="risk-card">
      <div class="risk-title"><span class="risk-icon">!</span>High Risk Detected</div>
      <div class="risk-quote">"Deposit is non-refundable even if the landlord cancels."</div>
      <div class="risk-fix"><small>Unstra Suggestion</small><p>Request "Mutual Termination" language to protect your cash.</p></div>
    </div>
  </div>
</section>
<section class="trust">
  <small>Anticipated Launch Coverage</small>
  <div class="trust-names"><span>LEGAL TODAY</span><span>TECH CRUNCH</span><span>PRODUCT HUNT</span><span>FREELANCE INSIDER</span></div>
</section>
<section id="security" class="section">
  <div class="security">
    <h2>Your privacy is non-negotiable.</h2>
    <p>We don't sell your data. We don't train our AI on your private contracts. All documents are encrypted and automatically deleted after analysis.</p>
    <div class="claims">
      <div class="claim"><h4>Bank-Level Encryption</h4><p>AES-256 bit encryption for all files.</p></div>
      <div class="claim"><h4>Auto-Delete</h4><p>Data is wiped instantly after your review.</p></div>
      <div class="claim"><h4>No AI Training</h4><p>Your data stays yours. Period.</p></div>
    </div>
  </div>
</section>
<section id="pricing" class="section pricing">
  <h2>The Beta Pass.</h2>
  <p class="sub">Limited access for the first cohort of founding members.</p>
  <div class="pass">
    <div class="phase">Phase 01</div>
    <h3 class="tier">Founding Member</h3>
    <div class="price"><strong>$0</strong><span>Beta Access</span></div>
    <p>Get <b>3 Full AI Scans</b> for free. Founding Members receive <b>priority queue access</b> and an exclusive <b>50% discount on their first year.</b></p>
    <div class="perks">
      <div class="perk"><i>&#10003;</i>3 High-Priority AI Scans</div>
      <div class="perk"><i>&#10003;</i>Founding Member Badge</div>
      <div class="perk"><i>&#10003;</i>Early Access to New Tools</div>
    </div>
    <a href="#" class="claim-btn">Claim My Spot</a>
  </div>
</section>
<footer class="footer">
  <div class="footer-grid">
    <div>
      <div class="logo"><div class="logo-mark">U</div>Unstra</div>
      <p>Empowering people to sign with total confidence. The future of contract review is driven by high-fidelity AI.</p>
      <div class="status"><span class="dot"></span>Systems Operational</div>
    </div>
    <div><h4>Product</h4><ul><li><a href="#features">Features</a></li><li><a href="#security">Security</a></li><li><a href="#pricing">Pricing</a></li></ul></div>
    <div><h4>Connect</h4><ul><li><a href="#">LinkedIn</a></li><li><a href="#">Twitter (X)</a></li><li><a href="mailto:{{CONTACT_EMAIL}}">Email</a></li></ul></div>
    <div><h4>Legal</h4><ul><li><a href="#">Privacy Policy</a></li><li><a href="#">Terms of Service</a></li></ul></div>
  </div>
  <div class="footer-base">
    <p class="rights">&copy; 2026 Unstra AI. All rights reserved.</p>
    <p class="disclaimer">Disclaimer: Unstra provides AI-driven contract analysis for informational purposes only. We are not a law firm and do not provide legal advice.</p>
  </div>
</footer>
<script>
(function(){
  var forms=document.querySelectorAll('form.waitlist-form');
  forms.forEach(function(form){
    form.addEventListener('submit',function(e){
      var btn=form.querySelector('button[type=submit]');
      if(btn.disabled){e.preventDefault();return;}
      btn.disabled=true;btn.classList.add('loading');
      btn.querySelector('.label').textContent='Joining...';
    });
  });
  window.addEventListener('pageshow',function(){
    forms.forEach(function(form){
      var btn=form.querySelector('button[type=submit]');
      btn.disabled=false;btn.classList.remove('loading');
      btn.querySelector('.label').textContent='Get Early Access';
    });
  });
})();
</script>
</body></html>
"##;
