use crate::client::{VoatClient, VoatError};
use crate::objects::{format_date, Submission, Subverse, VoatObject};
use chrono_tz::Tz;
use log::{error, info};

/// Configuration options for listing a subverse's posts
#[derive(Debug, Clone)]
pub struct PostsOptions {
    /// The name of the subverse to list
    pub subverse: String,
    /// Display posts in a brief, one-line format
    pub brief: bool,
    /// Zone used when displaying timestamps
    pub tz: Tz,
}

/// Result of a posts fetch operation
#[derive(Debug)]
pub struct PostsResult {
    /// The number of posts found
    pub post_count: usize,
    /// Formatted output (for CLI display)
    pub formatted_output: String,
    /// The posts themselves, still attached to the client
    pub posts: Vec<Submission>,
}

/// Operation for listing the posts of a subverse
pub struct PostsOperation {
    options: PostsOptions,
    client: VoatClient,
}

impl PostsOperation {
    pub fn with_client(options: PostsOptions, client: VoatClient) -> Self {
        Self { options, client }
    }

    /// Execute the posts operation
    pub async fn execute(&self) -> Result<PostsResult, VoatError> {
        info!("Fetching posts from v/{}", self.options.subverse);

        // Only the name is needed to resolve the posts relation
        let mut subverse = Subverse::default();
        subverse.name = self.options.subverse.clone();
        subverse.attach(self.client.handle());

        let posts = subverse.posts().await?.to_vec();

        let mut output = String::new();
        if posts.is_empty() {
            output.push_str("No posts found.\n");
        } else {
            output.push_str(&format!("Found {} posts\n", posts.len()));
            if self.options.brief {
                self.format_brief_output(&posts, &mut output);
                output.push_str("\nPost Type Legend:\n");
                output.push_str("[T] = Text post\n");
                output.push_str("[L] = Link\n");
            } else {
                self.format_detailed_output(&posts, &mut output);
            }
        }

        Ok(PostsResult {
            post_count: posts.len(),
            formatted_output: output,
            posts,
        })
    }

    fn format_brief_output(&self, posts: &[Submission], output: &mut String) {
        for post in posts {
            output.push_str(&format!(
                "{} [{}]\n",
                post.format_short_summary(),
                format_date(post.date, self.options.tz)
            ));
        }
    }

    fn format_detailed_output(&self, posts: &[Submission], output: &mut String) {
        for (i, post) in posts.iter().enumerate() {
            output.push_str(&format!("\n=== Post {} ===\n", i + 1));
            output.push_str(&post.format_summary(self.options.tz));
        }
    }
}

/// CLI handler function for posts command
pub async fn handle_posts_command(
    options: PostsOptions,
    client: VoatClient,
) -> Result<(), VoatError> {
    let operation = PostsOperation::with_client(options, client);
    match operation.execute().await {
        Ok(result) => {
            println!("{}", result.formatted_output);
            Ok(())
        }
        Err(err) => {
            error!("Error executing posts operation: {:?}", err);
            Err(err)
        }
    }
}
