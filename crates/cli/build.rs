use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let export = clap::Command::new("export")
        .about("Extract feed and folder posts into a single dataset")
        .arg(clap::arg!(--feed <FILE> "Atom feed export").default_value("blogger_export.xml"))
        .arg(clap::arg!(--posts <DIR> "Folder of exported HTML posts").default_value("posts"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .default_value("blogger_export.js"),
        )
        .arg(clap::arg!(--var <NAME> "Identifier the dataset is assigned to").default_value("postsData"))
        .arg(clap::arg!(--"feed-prefix" <URL> "Permalink prefix feed entries must match"))
        .arg(clap::arg!(--"link-prefix" <URL> "Permalink prefix folder posts must carry"))
        .arg(
            clap::arg!(--script <SCRIPT> "Target script")
                .default_value("hant")
                .value_parser(["hant", "tw", "hk", "none"]),
        )
        .arg(clap::arg!(--"skip-feed" "Do not read the feed export"))
        .arg(clap::arg!(--"no-year-check" "Do not report feed titles without a year"))
        .arg(clap::arg!(--ascii "Escape non-ASCII characters in the output"));

    let pages = clap::Command::new("pages")
        .about("Dump the whole visible text of every page in a folder")
        .arg(clap::arg!(--posts <DIR> "Folder of HTML pages").default_value("posts"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .default_value("posts_data.js"),
        )
        .arg(clap::arg!(--var <NAME> "Identifier the dataset is assigned to").default_value("postsData"))
        .arg(clap::arg!(--unicode "Keep non-ASCII characters unescaped"));

    let mut cmd = clap::Command::new("blogmerge")
        .version("1.0.0")
        .author("Blogmerge Contributors")
        .about("Merge blog exports into one front-end dataset")
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand(export)
        .subcommand(pages);

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "blogmerge", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "blogmerge", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "blogmerge", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "blogmerge", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
