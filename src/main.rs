//! Sectorfive - command line shell for the Sectorfive personal website

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sectorfive::{
    api::ApiError,
    config::Config,
    context::AppContext,
    models::{BackgroundType, ChangePasswordInput, ListQuery, UploadFile},
    paging::{ListSource, PagedResource, RefreshOutcome},
    render,
    router::{nav_links, AuthGate, GateDecision, Route},
    views::{
        admin::{
            AnalyticsPanel, CrudPanel, Dashboard, Editable, GalleryImages, Messages, Pages, Posts,
            Resource, SettingsPanel,
        },
        blog::{NO_POSTS, POST_NOT_FOUND},
        contact::SENT_MESSAGE,
        gallery::NO_IMAGES,
        page::PAGE_NOT_FOUND,
        setup::SETUP_DONE,
        BlogPostView, BlogView, ContactForm, ContactStatus, GalleryView, HomeView, LoadState,
        LoginForm, PageView, SetupForm,
    },
};

#[derive(Parser)]
#[command(name = "sectorfive", version, about = "Browse and manage the Sectorfive website")]
struct Cli {
    /// Configuration file
    #[arg(long, short, global = true, default_value = "config.yml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the homepage
    Home,
    /// Show a page by slug
    Page { slug: String },
    /// List published blog posts
    Blog(ListArgs),
    /// Show a blog post by slug
    Post { slug: String },
    /// List gallery images
    Gallery {
        #[command(flatten)]
        list: ListArgs,
        /// Only featured images
        #[arg(long)]
        featured: bool,
    },
    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    /// Log in as the site administrator
    Login {
        #[arg(long, short)]
        username: String,
        /// Read from stdin when omitted
        #[arg(long, short)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show backend, session and navigation
    Status,
    /// Resolve a site path through the route table and gate
    Route { path: String },
    /// Replace the default admin credentials
    Setup {
        #[arg(long)]
        old_password: Option<String>,
        #[arg(long)]
        new_username: String,
        #[arg(long)]
        new_password: Option<String>,
    },
    /// Change the admin password only
    ChangePassword {
        #[arg(long)]
        old_password: Option<String>,
        #[arg(long)]
        new_password: Option<String>,
    },
    /// Admin panels
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Args)]
struct ListArgs {
    /// Search text
    #[arg(long, short)]
    search: Option<String>,
    /// Tag filter, repeatable
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Page number
    #[arg(long)]
    page: Option<u32>,
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Record counts
    Dashboard,
    /// Manage pages
    Pages {
        #[command(subcommand)]
        action: PageAction,
    },
    /// Manage blog posts
    Posts {
        #[command(subcommand)]
        action: PostAction,
    },
    /// Manage gallery images
    Gallery {
        #[command(subcommand)]
        action: GalleryAction,
    },
    /// Read and delete contact messages
    Messages {
        #[command(subcommand)]
        action: MessageAction,
    },
    /// Visitor analytics
    Analytics {
        #[arg(long, short)]
        search: Option<String>,
        /// Country filter; `all` for every country
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Site settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Upload a file
    Upload { path: PathBuf },
    /// Download an uploaded file
    Download {
        filename: String,
        /// Defaults to the file name in the current directory
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct DeleteArgs {
    id: String,
    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

#[derive(Subcommand)]
enum PageAction {
    List(ListArgs),
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        slug: String,
        #[command(flatten)]
        content: ContentArgs,
    },
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        content: ContentArgs,
    },
    Delete(DeleteArgs),
}

#[derive(Subcommand)]
enum PostAction {
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only drafts (`false`) or only published posts (`true`)
        #[arg(long)]
        published: Option<bool>,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        slug: String,
        #[command(flatten)]
        content: ContentArgs,
        #[command(flatten)]
        fields: PostFields,
    },
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        content: ContentArgs,
        #[command(flatten)]
        fields: PostFields,
    },
    Delete(DeleteArgs),
}

#[derive(Args)]
struct ContentArgs {
    /// Content HTML
    #[arg(long, conflicts_with = "content_file")]
    content: Option<String>,
    /// Read the content HTML from a file
    #[arg(long)]
    content_file: Option<PathBuf>,
}

#[derive(Args)]
struct PostFields {
    #[arg(long)]
    excerpt: Option<String>,
    /// Comma separated tags
    #[arg(long)]
    tags: Option<String>,
    #[arg(long)]
    featured_image: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    meta_description: Option<String>,
    #[arg(long)]
    published: Option<bool>,
}

#[derive(Subcommand)]
enum GalleryAction {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        featured: bool,
    },
    /// Upload a new image
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        file: PathBuf,
        #[command(flatten)]
        fields: ImageFields,
    },
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: ImageFields,
    },
    Delete(DeleteArgs),
}

#[derive(Args)]
struct ImageFields {
    #[arg(long)]
    description: Option<String>,
    /// Comma separated tags
    #[arg(long)]
    tags: Option<String>,
    #[arg(long)]
    featured: Option<bool>,
}

#[derive(Subcommand)]
enum MessageAction {
    List(ListArgs),
    Delete(DeleteArgs),
}

#[derive(Subcommand)]
enum SettingsAction {
    Show,
    Set {
        #[arg(long)]
        site_title: Option<String>,
        #[arg(long)]
        site_email: Option<String>,
        /// Bytes
        #[arg(long)]
        max_file_size: Option<u64>,
        /// Seconds between contact messages from one visitor
        #[arg(long)]
        contact_cooldown: Option<u64>,
        /// default, color, gradient or image
        #[arg(long)]
        background_type: Option<BackgroundType>,
        #[arg(long)]
        background_value: Option<String>,
    },
    /// Upload an image and use it as the site background
    Background { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sectorfive=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load_with_env(&cli.config)?;
    tracing::debug!("Configuration loaded from {}", cli.config.display());
    let ctx = AppContext::bootstrap(config)?;

    match cli.command {
        Command::Home => home(&ctx).await,
        Command::Page { slug } => page(&ctx, &slug).await,
        Command::Blog(list) => blog(&ctx, list).await,
        Command::Post { slug } => post(&ctx, &slug).await,
        Command::Gallery { list, featured } => gallery(&ctx, list, featured).await,
        Command::Contact {
            name,
            email,
            message,
        } => contact(&ctx, name, email, message).await,
        Command::Login { username, password } => login(&ctx, username, password).await,
        Command::Logout => {
            ctx.session.logout()?;
            println!("Logged out");
            Ok(())
        }
        Command::Status => status(&ctx).await,
        Command::Route { path } => route(&ctx, &path).await,
        Command::Setup {
            old_password,
            new_username,
            new_password,
        } => setup(&ctx, old_password, new_username, new_password).await,
        Command::ChangePassword {
            old_password,
            new_password,
        } => change_password(&ctx, old_password, new_password).await,
        Command::Admin { command } => {
            require_admin(&ctx).await?;
            admin(&ctx, command).await
        }
    }
}

// Visitor commands

async fn home(ctx: &AppContext) -> Result<()> {
    let home = HomeView::load(ctx).await;
    println!("{}\n", home.title);
    println!("{}", home.content);
    Ok(())
}

async fn page(ctx: &AppContext, slug: &str) -> Result<()> {
    let view = PageView::load(ctx, slug).await;
    match (&view.state, view.content_html(ctx)) {
        (LoadState::Loaded(page), Some(html)) => {
            println!("{}\n", page.title);
            println!("{}", html);
            Ok(())
        }
        (LoadState::Failed(message), _) => bail!("{}", message),
        _ => bail!("{}", PAGE_NOT_FOUND),
    }
}

async fn blog(ctx: &AppContext, list: ListArgs) -> Result<()> {
    let view = BlogView::open(ctx).await;
    if let Some(search) = &list.search {
        view.search(search).await;
    }
    for tag in &list.tags {
        view.toggle_tag(tag).await;
    }
    apply_page(view.posts(), list.page).await?;
    if let Some(error) = view.posts().error() {
        bail!("{}", error);
    }

    if !view.tags().is_empty() {
        let selected = view.selected_tags();
        let cloud: Vec<String> = view
            .tags()
            .iter()
            .map(|tag| if selected.contains(tag) { format!("[{}]", tag) } else { tag.clone() })
            .collect();
        println!("Tags: {}\n", cloud.join(" "));
    }

    let previews = view.previews();
    if previews.is_empty() {
        println!("{}", NO_POSTS);
    }
    for preview in previews {
        println!("{}  {}  ({})", preview.date, preview.title, preview.slug);
        if !preview.tags.is_empty() {
            println!("    #{}", preview.tags.join(" #"));
        }
        println!("    {}\n", preview.excerpt);
    }
    println!("{}", view.posts().controls().label());
    Ok(())
}

async fn post(ctx: &AppContext, slug: &str) -> Result<()> {
    let view = BlogPostView::load(ctx, slug).await;
    match (&view.state, view.content_html(ctx)) {
        (LoadState::Loaded(post), Some(html)) => {
            println!("{}", post.title);
            println!("{}\n", render::format_date(&post.created_at));
            println!("{}", html);
            Ok(())
        }
        (LoadState::Failed(message), _) => bail!("{}", message),
        _ => bail!("{}", POST_NOT_FOUND),
    }
}

async fn gallery(ctx: &AppContext, list: ListArgs, featured: bool) -> Result<()> {
    let view = GalleryView::open(ctx).await;
    if featured {
        view.set_featured_only(true).await;
    }
    if let Some(search) = &list.search {
        view.search(search).await;
    }
    for tag in &list.tags {
        view.toggle_tag(tag).await;
    }
    apply_page(view.images(), list.page).await?;
    if let Some(error) = view.images().error() {
        bail!("{}", error);
    }

    let images = view.items();
    if images.is_empty() {
        println!("{}", NO_IMAGES);
    }
    for image in images {
        let star = if image.is_featured { "★ " } else { "" };
        println!("{}{}  {}", star, image.title, image.file_url);
    }
    println!("{}", view.images().controls().label());
    Ok(())
}

async fn contact(ctx: &AppContext, name: String, email: String, message: String) -> Result<()> {
    let mut form = ContactForm::new();
    form.name = name;
    form.email = email;
    form.message = message;
    match form.submit(&ctx.api).await {
        ContactStatus::Sent => {
            println!("{}", SENT_MESSAGE);
            Ok(())
        }
        _ => bail!("{}", form.error().unwrap_or("Message was not sent")),
    }
}

async fn login(ctx: &AppContext, username: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password")?,
    };
    let mut form = LoginForm::new(username, password);
    match form.submit(ctx).await {
        Some(Route::FirstSetup) => {
            println!("Logged in. The default credentials are still in use; run `sectorfive setup`.");
            Ok(())
        }
        Some(_) => {
            println!("Logged in");
            Ok(())
        }
        None => bail!("{}", form.error().unwrap_or("Login failed")),
    }
}

async fn status(ctx: &AppContext) -> Result<()> {
    println!("Backend:  {}", ctx.api.base_url());
    let settings = ctx.api.public_settings().await.unwrap_or_else(|e| {
        tracing::warn!("Failed to fetch public settings: {}", e);
        Default::default()
    });
    println!("Site:     {}", settings.site_title);
    if let Some(css) = render::background_css(&settings) {
        println!("Style:    {}", css);
    }

    let authenticated = ctx.session.is_authenticated();
    if authenticated {
        match ctx.api.me().await {
            Ok(me) => {
                println!("Session:  logged in as {}", me.username);
                if me.must_change_password {
                    println!("          default credentials still in use");
                }
            }
            Err(e) if e.is_unauthorized() => println!("Session:  token rejected by the server"),
            Err(e) => println!("Session:  logged in ({})", e),
        }
    } else {
        println!("Session:  not logged in");
    }

    let pages = ctx
        .api
        .list_pages(&ListQuery::new(ctx.config.listing.admin_per_page))
        .await
        .map(|list| list.items)
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch pages: {}", e);
            Vec::new()
        });
    let links: Vec<String> = nav_links(&pages, authenticated, ctx.admin_path())
        .into_iter()
        .map(|link| format!("{} ({})", link.label, link.path))
        .collect();
    println!("Nav:      {}", links.join(" | "));
    Ok(())
}

async fn route(ctx: &AppContext, path: &str) -> Result<()> {
    let route = Route::parse(path, ctx.admin_path());
    match AuthGate::new(ctx).check(&route).await {
        GateDecision::Render(route) => println!("render {:?} at {}", route, route.path(ctx.admin_path())),
        GateDecision::Redirect(to) => println!("redirect to {}", to.path(ctx.admin_path())),
    }
    Ok(())
}

async fn setup(
    ctx: &AppContext,
    old_password: Option<String>,
    new_username: String,
    new_password: Option<String>,
) -> Result<()> {
    if let GateDecision::Redirect(_) = AuthGate::new(ctx).check(&Route::FirstSetup).await {
        bail!("Not logged in; run `sectorfive login` first");
    }

    let old_password = or_prompt(old_password, "Current password")?;
    let (new_password, confirm_password) = match new_password {
        Some(password) => (password.clone(), password),
        None => (prompt("New password")?, prompt("Confirm new password")?),
    };
    let mut form = SetupForm::default();
    form.old_password = old_password;
    form.new_username = new_username;
    form.new_password = new_password;
    form.confirm_password = confirm_password;
    match form.submit(ctx).await {
        Some(_) => {
            println!("{}", SETUP_DONE);
            Ok(())
        }
        None => bail!("{}", form.error().unwrap_or("Setup failed")),
    }
}

async fn change_password(
    ctx: &AppContext,
    old_password: Option<String>,
    new_password: Option<String>,
) -> Result<()> {
    if !ctx.session.is_authenticated() {
        bail!("Not logged in; run `sectorfive login` first");
    }
    let input = ChangePasswordInput {
        old_password: or_prompt(old_password, "Current password")?,
        new_password: or_prompt(new_password, "New password")?,
    };
    if input.new_password.is_empty() {
        bail!("New password is required");
    }
    ctx.api
        .change_password(&input)
        .await
        .map_err(|e| anyhow::anyhow!(e.message()))?;
    println!("Password updated successfully");
    Ok(())
}

// Admin commands

async fn require_admin(ctx: &AppContext) -> Result<()> {
    match AuthGate::new(ctx).check(&Route::Admin).await {
        GateDecision::Render(_) => Ok(()),
        GateDecision::Redirect(Route::FirstSetup) => {
            bail!("The default credentials are still in use; run `sectorfive setup` first")
        }
        GateDecision::Redirect(_) => bail!("Not logged in; run `sectorfive login` first"),
    }
}

async fn admin(ctx: &AppContext, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::Dashboard => {
            let dashboard = Dashboard::open(ctx).await;
            for (label, value) in dashboard.cards() {
                println!("{:<20} {}", label, value);
            }
            Ok(())
        }
        AdminCommand::Pages { action } => admin_pages(ctx, action).await,
        AdminCommand::Posts { action } => admin_posts(ctx, action).await,
        AdminCommand::Gallery { action } => admin_gallery(ctx, action).await,
        AdminCommand::Messages { action } => admin_messages(ctx, action).await,
        AdminCommand::Analytics {
            search,
            country,
            page,
        } => admin_analytics(ctx, search, country, page).await,
        AdminCommand::Settings { action } => admin_settings(ctx, action).await,
        AdminCommand::Upload { path } => {
            let file = read_upload(&path).await?;
            let uploaded = ctx.api.upload_file(&file).await.map_err(api_failure)?;
            println!("{} ({})", uploaded.filename, render::format_size(uploaded.size));
            println!("{}", ctx.api.upload_url(&uploaded.filename));
            Ok(())
        }
        AdminCommand::Download { filename, output } => {
            let bytes = ctx.api.download_upload(&filename).await.map_err(api_failure)?;
            let output = output.unwrap_or_else(|| PathBuf::from(&filename));
            tokio::fs::write(&output, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Saved {} ({})", output.display(), render::format_size(bytes.len() as u64));
            Ok(())
        }
    }
}

async fn admin_pages(ctx: &AppContext, action: PageAction) -> Result<()> {
    match action {
        PageAction::List(list) => {
            let panel = open_list(ctx, Pages, &list).await?;
            for page in panel.items() {
                let marker = if page.is_homepage { " (homepage)" } else { "" };
                println!("{}  /page/{}  {}{}", page.id, page.slug, page.title, marker);
            }
            println!("{}", panel.list().controls().label());
            Ok(())
        }
        PageAction::Create {
            title,
            slug,
            content,
        } => {
            let mut panel = CrudPanel::new(ctx, Pages);
            panel.start_create();
            let form = panel.form_mut();
            form.title = title;
            form.slug = slug;
            form.content = content.read().await?.unwrap_or_default();
            let ok = panel.submit().await;
            finish(ok, &panel)
        }
        PageAction::Edit { id, title, content } => {
            let mut panel = CrudPanel::open(ctx, Pages).await;
            find_for_edit(&mut panel, &id).await?;
            let content = content.read().await?;
            let form = panel.form_mut();
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(content) = content {
                form.content = content;
            }
            let ok = panel.submit().await;
            finish(ok, &panel)
        }
        PageAction::Delete(args) => delete_record(CrudPanel::new(ctx, Pages), args).await,
    }
}

async fn admin_posts(ctx: &AppContext, action: PostAction) -> Result<()> {
    match action {
        PostAction::List { list, published } => {
            let panel = CrudPanel::new(ctx, Posts);
            if published.is_some() {
                panel.list().set_published(published).await;
            }
            apply_list_args(panel.list(), &list).await?;
            for post in panel.items() {
                let state = if post.published { "published" } else { "draft" };
                println!(
                    "{}  {}  {}  [{}]  {}",
                    post.id,
                    render::format_date(&post.created_at),
                    post.slug,
                    state,
                    post.title
                );
            }
            println!("{}", panel.list().controls().label());
            Ok(())
        }
        PostAction::Create {
            title,
            slug,
            content,
            fields,
        } => {
            let mut panel = CrudPanel::new(ctx, Posts);
            panel.start_create();
            let content = content.read().await?.unwrap_or_default();
            let form = panel.form_mut();
            form.title = title;
            form.slug = slug;
            form.content = content;
            fields.apply(form);
            let ok = panel.submit().await;
            finish(ok, &panel)
        }
        PostAction::Edit {
            id,
            title,
            content,
            fields,
        } => {
            let mut panel = CrudPanel::open(ctx, Posts).await;
            find_for_edit(&mut panel, &id).await?;
            let content = content.read().await?;
            let form = panel.form_mut();
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(content) = content {
                form.content = content;
            }
            fields.apply(form);
            let ok = panel.submit().await;
            finish(ok, &panel)
        }
        PostAction::Delete(args) => delete_record(CrudPanel::new(ctx, Posts), args).await,
    }
}

async fn admin_gallery(ctx: &AppContext, action: GalleryAction) -> Result<()> {
    match action {
        GalleryAction::List { list, featured } => {
            let panel = CrudPanel::new(ctx, GalleryImages);
            if featured {
                panel.list().set_featured(Some(true)).await;
            }
            apply_list_args(panel.list(), &list).await?;
            for image in panel.items() {
                let star = if image.is_featured { "★" } else { " " };
                println!("{} {}  {}  {}", star, image.id, image.title, image.file_url);
            }
            println!("{}", panel.list().controls().label());
            Ok(())
        }
        GalleryAction::Create {
            title,
            file,
            fields,
        } => {
            let mut panel = CrudPanel::new(ctx, GalleryImages);
            panel.start_create();
            let file = read_upload(&file).await?;
            let form = panel.form_mut();
            form.title = title;
            form.file = Some(file);
            fields.apply(form);
            let ok = panel.submit().await;
            finish(ok, &panel)
        }
        GalleryAction::Edit { id, title, fields } => {
            let mut panel = CrudPanel::open(ctx, GalleryImages).await;
            find_for_edit(&mut panel, &id).await?;
            let form = panel.form_mut();
            if let Some(title) = title {
                form.title = title;
            }
            fields.apply(form);
            let ok = panel.submit().await;
            finish(ok, &panel)
        }
        GalleryAction::Delete(args) => delete_record(CrudPanel::new(ctx, GalleryImages), args).await,
    }
}

async fn admin_messages(ctx: &AppContext, action: MessageAction) -> Result<()> {
    match action {
        MessageAction::List(list) => {
            let panel = open_list(ctx, Messages, &list).await?;
            for message in panel.items() {
                println!(
                    "{}  {}  {} <{}>",
                    message.id,
                    render::format_datetime(&message.created_at),
                    message.name,
                    message.email
                );
                println!("    {}\n", message.message);
            }
            println!("{}", panel.list().controls().label());
            Ok(())
        }
        MessageAction::Delete(args) => delete_record(CrudPanel::new(ctx, Messages), args).await,
    }
}

async fn admin_analytics(
    ctx: &AppContext,
    search: Option<String>,
    country: Option<String>,
    page: Option<u32>,
) -> Result<()> {
    let panel = AnalyticsPanel::open(ctx).await;
    if let Some(search) = search {
        panel.search(&search).await;
    }
    if let Some(country) = country {
        panel.set_country(&country).await;
    }
    if let Some(page) = page {
        if panel.set_page(page).await.is_none() {
            bail!("Page {} is out of range", page);
        }
    }
    let Some(report) = panel.report() else {
        bail!("{}", panel.error().unwrap_or_else(|| "No analytics available".to_string()));
    };

    println!("Total visits:    {}", report.total_visits);
    println!("Unique visitors: {}", report.unique_visitors);
    for (title, buckets) in [
        ("Top pages", &report.top_pages),
        ("Top countries", &report.top_countries),
        ("Top browsers", &report.top_browsers),
    ] {
        if buckets.is_empty() {
            continue;
        }
        println!("\n{}:", title);
        for bucket in buckets {
            println!("  {:<30} {}", bucket.label(), bucket.count);
        }
    }

    println!("\nRecent visits:");
    for visit in panel.visits() {
        println!(
            "  {}  {:<15}  {:<4}  {}",
            render::format_datetime(&visit.timestamp),
            visit.ip_address,
            visit.country.as_deref().unwrap_or("-"),
            visit.page_url
        );
    }
    println!("{}", panel.controls().label());
    Ok(())
}

async fn admin_settings(ctx: &AppContext, action: SettingsAction) -> Result<()> {
    let mut panel = SettingsPanel::open(ctx).await;
    if let LoadState::Failed(message) = panel.state() {
        bail!("Failed to load settings: {}", message);
    }

    match action {
        SettingsAction::Show => {
            let settings = &panel.settings;
            println!("Site title:       {}", settings.site_title);
            println!("Site email:       {}", settings.site_email);
            println!("Max file size:    {}", render::format_size(settings.max_file_size));
            println!("Contact cooldown: {}s", settings.contact_cooldown);
            println!("Background:       {}", settings.background_type);
            if let Some(value) = &settings.background_value {
                println!("Background value: {}", value);
            }
            if let Some(url) = &settings.background_image_url {
                println!("Background image: {}", url);
            }
            Ok(())
        }
        SettingsAction::Set {
            site_title,
            site_email,
            max_file_size,
            contact_cooldown,
            background_type,
            background_value,
        } => {
            let settings = &mut panel.settings;
            if let Some(title) = site_title {
                settings.site_title = title;
            }
            if let Some(email) = site_email {
                settings.site_email = email;
            }
            if let Some(size) = max_file_size {
                settings.max_file_size = size;
            }
            if let Some(cooldown) = contact_cooldown {
                settings.contact_cooldown = cooldown;
            }
            if let Some(kind) = background_type {
                settings.background_type = kind;
            }
            if let Some(value) = background_value {
                settings.background_value = Some(value);
            }
            save_settings(&mut panel).await
        }
        SettingsAction::Background { path } => {
            let file = read_upload(&path).await?;
            if !panel.upload_background(&file).await {
                bail!("{}", panel.alert().unwrap_or("Upload failed"));
            }
            save_settings(&mut panel).await
        }
    }
}

async fn save_settings(panel: &mut SettingsPanel) -> Result<()> {
    if panel.save().await {
        println!("{}", panel.notice().unwrap_or("Saved"));
        Ok(())
    } else {
        bail!("{}", panel.alert().unwrap_or("Save failed"))
    }
}

// Helpers

impl ContentArgs {
    async fn read(self) -> Result<Option<String>> {
        match (self.content, self.content_file) {
            (Some(content), _) => Ok(Some(content)),
            (None, Some(path)) => tokio::fs::read_to_string(&path)
                .await
                .map(Some)
                .with_context(|| format!("Failed to read {}", path.display())),
            (None, None) => Ok(None),
        }
    }
}

impl PostFields {
    fn apply(self, form: &mut sectorfive::views::admin::PostForm) {
        if let Some(excerpt) = self.excerpt {
            form.excerpt = excerpt;
        }
        if let Some(tags) = self.tags {
            form.tags_text = tags;
        }
        if let Some(image) = self.featured_image {
            form.featured_image = image;
        }
        if let Some(author) = self.author {
            form.author = author;
        }
        if let Some(meta) = self.meta_description {
            form.meta_description = meta;
        }
        if let Some(published) = self.published {
            form.published = published;
        }
    }
}

impl ImageFields {
    fn apply(self, form: &mut sectorfive::views::admin::GalleryForm) {
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(tags) = self.tags {
            form.tags_text = tags;
        }
        if let Some(featured) = self.featured {
            form.is_featured = featured;
        }
    }
}

/// Apply search, tags and page to a list, reporting fetch failures
async fn apply_list_args<S: ListSource>(list: &PagedResource<S>, args: &ListArgs) -> Result<()> {
    if !args.tags.is_empty() {
        list.update_filters(|q| {
            q.set_search(args.search.clone().unwrap_or_default());
            q.tags = args.tags.clone();
        })
        .await;
    } else if let Some(search) = &args.search {
        list.set_search(search).await;
    } else if list.current().is_none() {
        list.refresh().await;
    }
    apply_page(list, args.page).await?;
    if let Some(error) = list.error() {
        bail!("{}", error);
    }
    Ok(())
}

async fn apply_page<S: ListSource>(list: &PagedResource<S>, page: Option<u32>) -> Result<()> {
    let Some(page) = page else {
        return Ok(());
    };
    match list.set_page(page).await {
        Some(RefreshOutcome::Failed(message)) => bail!("{}", message),
        Some(_) => Ok(()),
        None => bail!("Page {} is out of range ({})", page, list.controls().label()),
    }
}

async fn open_list<R: Resource>(ctx: &AppContext, resource: R, args: &ListArgs) -> Result<CrudPanel<R>> {
    let panel = CrudPanel::new(ctx, resource);
    apply_list_args(panel.list(), args).await?;
    Ok(panel)
}

/// Walk the list until the record is found and loaded into the form
async fn find_for_edit<R: Editable>(panel: &mut CrudPanel<R>, id: &str) -> Result<()> {
    loop {
        if let Some(error) = panel.list().error() {
            bail!("{}", error);
        }
        if panel.edit_by_id(id) {
            return Ok(());
        }
        if panel.next_page().await.is_none() {
            bail!("{} {} not found", R::NAME, id);
        }
    }
}

async fn delete_record<R: Resource>(mut panel: CrudPanel<R>, args: DeleteArgs) -> Result<()> {
    panel.request_delete(args.id.as_str());
    let question = format!("Delete {} {}?", R::NAME.to_lowercase(), args.id);
    if !args.yes && !confirm(&question)? {
        panel.cancel_delete();
        println!("Cancelled");
        return Ok(());
    }
    let ok = panel.confirm_delete().await;
    finish(ok, &panel)
}

fn finish<R: Resource>(ok: bool, panel: &CrudPanel<R>) -> Result<()> {
    if ok {
        println!("{}", panel.notice().unwrap_or("Done"));
        Ok(())
    } else {
        bail!("{}", panel.alert().unwrap_or("Request failed"))
    }
}

async fn read_upload(path: &Path) -> Result<UploadFile> {
    UploadFile::from_path(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

fn api_failure(e: ApiError) -> anyhow::Error {
    anyhow::anyhow!(e.message())
}

fn or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => prompt(label),
    }
}

/// Read one line from stdin
fn prompt(label: &str) -> Result<String> {
    eprint!("{}: ", label);
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{} [y/N]", question))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
