//! End-to-end tests: a fixture template run through `CreateAppService`
//! with the real adapters.

use std::fs;
use std::path::{Path, PathBuf};

use appforge_adapters::{LocalFetcher, LocalFilesystem, MemoryFilesystem, PermissionBitMarker};
use appforge_core::{
    application::{ApplicationError, Filesystem, TemplateFetcher},
    domain::{AppDescriptor, TemplateProfile},
    error::{AppforgeError, AppforgeResult},
    prelude::CreateAppService,
};
use tempfile::TempDir;

const PYPROJECT: &str = r#"[build-system]
requires = ["setuptools>=65.5.1", "setuptools-scm", "wheel"]
build-backend = "setuptools.build_meta"

[project]
name = "fastapi_template_project"
description = "Example FastAPI project"
version = "1.0.0"


authors = ["Zach Vorhies"]
keywords = ["template fastapi"]
"#;

const SETUP_PY: &str = r#"import os
from setuptools import setup

URL = "https://github.com/zackees/template-fastapi-project"
KEYWORDS = "template fastapi"

if __name__ == "__main__":
    setup(
        maintainer="Zach Vorhies",
        keywords=KEYWORDS,
        url=URL,
    )
"#;

const README: &str = "# fastapi_template_project\n\n\
Example FastAPI Project with Docker, ready for Render.com / DigitalOcean\n\n\
Run `python -m fastapi_template_project`\n";

const APP_PY: &str = r#"from fastapi import FastAPI
from fastapi_template_project.version import VERSION

app = FastAPI(title="FastAPI Template Project")
# template_fastapi_project
"#;

/// Build the fixture template under `root`.
fn write_template(root: &Path) {
    let pkg = root.join("src/fastapi_template_project");
    fs::create_dir_all(&pkg).unwrap();
    fs::create_dir_all(root.join("tests")).unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();

    fs::write(root.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
    fs::write(root.join("pyproject.toml"), PYPROJECT).unwrap();
    fs::write(root.join("setup.py"), SETUP_PY).unwrap();
    fs::write(root.join("README.md"), README).unwrap();
    fs::write(
        root.join("run_dev.py"),
        "import uvicorn\nuvicorn.run(\"fastapi_template_project.app:app\")\n",
    )
    .unwrap();
    fs::write(
        root.join("entry_point.sh"),
        "#!/bin/bash\nuvicorn fastapi_template_project.app:app\n",
    )
    .unwrap();
    fs::write(pkg.join("__init__.py"), "").unwrap();
    fs::write(pkg.join("app.py"), APP_PY).unwrap();
    fs::write(
        pkg.join("version.py"),
        "# fastapi_template_project version\nVERSION = \"1.0.0\"\n",
    )
    .unwrap();
    fs::write(
        root.join("tests/test_app.py"),
        "from fastapi_template_project.app import app\n",
    )
    .unwrap();
}

fn local_service(template: &Path) -> CreateAppService {
    CreateAppService::new(
        TemplateProfile::default().with_url(template.to_string_lossy()),
        Box::new(LocalFetcher),
        Box::new(LocalFilesystem),
        Box::new(PermissionBitMarker::new(LocalFilesystem)),
    )
}

fn myapp(destination: PathBuf) -> AppDescriptor {
    AppDescriptor::builder()
        .name("myapp")
        .description("MyAppTest description")
        .author("Firstname Lastname")
        .keywords("myapp test")
        .version("1.2.3")
        .github_url("https://github.com/author/myapp")
        .destination(destination)
        .build()
        .unwrap()
}

fn python_files(dir: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            out.extend(python_files(&path));
        } else if path.extension().is_some_and(|e| e == "py") {
            out.push(path);
        }
    }
    out
}

#[test]
fn creates_named_project_from_template() {
    let template = TempDir::new().unwrap();
    write_template(template.path());
    let out = TempDir::new().unwrap();
    let dest = out.path().join("myapp");

    let report = local_service(template.path())
        .create(&myapp(dest.clone()))
        .unwrap();

    assert_eq!(report.package_name, "myapp");
    assert!(dest.join("src/myapp/__init__.py").is_file());
    assert!(!dest.join("src/fastapi_template_project").exists());
    assert!(dest.join("tests").is_dir());
    assert!(!dest.join(".git").exists());

    let pyproject = fs::read_to_string(dest.join("pyproject.toml")).unwrap();
    assert!(pyproject.contains("name = \"myapp\""));
    assert!(pyproject.contains("description = \"MyAppTest description\""));
    assert!(pyproject.contains("version = \"1.2.3\""));
    assert!(pyproject.contains("authors = [\"Firstname Lastname\"]"));
    assert!(pyproject.contains("keywords = [\"myapp test\"]"));
    assert!(!pyproject.contains("\n\n\n"));

    let setup = fs::read_to_string(dest.join("setup.py")).unwrap();
    assert!(setup.contains("URL = \"https://github.com/author/myapp\""));
    assert!(setup.contains("KEYWORDS = \"myapp test\""));
    // Indented lines do not start with the trigger.
    assert!(setup.contains("        maintainer=\"Zach Vorhies\","));

    for file in python_files(&dest) {
        let text = fs::read_to_string(&file).unwrap();
        assert!(
            !text.contains("fastapi_template_project"),
            "{} still has the placeholder",
            file.display()
        );
        assert!(!text.contains("template_fastapi_project"));
    }

    let app = fs::read_to_string(dest.join("src/myapp/app.py")).unwrap();
    assert!(app.contains("FastAPI(title=\"myapp\")"));

    let readme = fs::read_to_string(dest.join("README.md")).unwrap();
    assert!(readme.starts_with("# myapp\n"));
    assert!(readme.contains("myapp with Docker, ready for Render.com / DigitalOcean"));
    assert!(!readme.contains("Example FastAPI Project"));

    let entry = fs::read_to_string(dest.join("entry_point.sh")).unwrap();
    assert!(entry.contains("uvicorn myapp.app:app"));
}

#[cfg(unix)]
#[test]
fn shell_scripts_are_executable() {
    use std::os::unix::fs::PermissionsExt;

    let template = TempDir::new().unwrap();
    write_template(template.path());
    fs::set_permissions(
        template.path().join("entry_point.sh"),
        fs::Permissions::from_mode(0o644),
    )
    .unwrap();
    let out = TempDir::new().unwrap();
    let dest = out.path().join("myapp");

    let report = local_service(template.path())
        .create(&myapp(dest.clone()))
        .unwrap();

    assert_eq!(report.executables, vec![PathBuf::from("entry_point.sh")]);
    let mode = fs::metadata(dest.join("entry_point.sh"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o111, 0o111);
}

#[test]
fn empty_github_url_is_written_as_empty_string() {
    let template = TempDir::new().unwrap();
    write_template(template.path());
    let out = TempDir::new().unwrap();
    let dest = out.path().join("svc");

    let app = AppDescriptor::builder()
        .destination(dest.clone())
        .build()
        .unwrap();
    let report = local_service(template.path()).create(&app).unwrap();

    assert_eq!(report.app_name, "svc");
    assert!(dest.join("src/svc/__init__.py").is_file());

    let setup = fs::read_to_string(dest.join("setup.py")).unwrap();
    assert!(setup.contains("URL = \"\""));
    let pyproject = fs::read_to_string(dest.join("pyproject.toml")).unwrap();
    assert!(pyproject.contains("version = \"1.0.0\""));
}

#[test]
fn dashed_name_uses_underscored_package() {
    let template = TempDir::new().unwrap();
    write_template(template.path());
    let out = TempDir::new().unwrap();
    let dest = out.path().join("my-service");

    let app = AppDescriptor::builder()
        .github_url("https://github.com/author/my-service.git/")
        .destination(dest.clone())
        .build()
        .unwrap();
    let report = local_service(template.path()).create(&app).unwrap();

    assert_eq!(report.app_name, "my-service");
    assert!(dest.join("src/my_service/app.py").is_file());
    let pyproject = fs::read_to_string(dest.join("pyproject.toml")).unwrap();
    assert!(pyproject.contains("name = \"my-service\""));
}

#[test]
fn second_run_into_same_destination_conflicts() {
    let template = TempDir::new().unwrap();
    write_template(template.path());
    let out = TempDir::new().unwrap();
    let dest = out.path().join("myapp");
    let service = local_service(template.path());

    service.create(&myapp(dest.clone())).unwrap();
    let err = service.create(&myapp(dest)).unwrap_err();

    assert!(matches!(
        err,
        AppforgeError::Application(ApplicationError::DestinationExists { .. })
    ));
}

#[test]
fn template_without_placeholder_fails_before_writing() {
    let template = TempDir::new().unwrap();
    fs::create_dir_all(template.path().join("src/other")).unwrap();
    fs::write(template.path().join("pyproject.toml"), PYPROJECT).unwrap();
    let out = TempDir::new().unwrap();
    let dest = out.path().join("myapp");

    let err = local_service(template.path())
        .create(&myapp(dest.clone()))
        .unwrap_err();

    assert!(matches!(
        err,
        AppforgeError::Application(ApplicationError::PlaceholderNotFound { .. })
    ));
    assert!(!dest.exists());
}

#[test]
fn missing_manifest_is_precondition_failure() {
    let template = TempDir::new().unwrap();
    write_template(template.path());
    fs::remove_file(template.path().join("setup.py")).unwrap();
    let out = TempDir::new().unwrap();

    let err = local_service(template.path())
        .create(&myapp(out.path().join("myapp")))
        .unwrap_err();

    assert!(matches!(
        err,
        AppforgeError::Application(ApplicationError::MissingFile { .. })
    ));
}

#[test]
fn invalid_name_leaves_destination_untouched() {
    let template = TempDir::new().unwrap();
    write_template(template.path());
    let out = TempDir::new().unwrap();
    let dest = out.path().join("bad");

    let app = AppDescriptor::builder()
        .name("my.app")
        .destination(dest.clone())
        .build()
        .unwrap();
    assert!(local_service(template.path()).create(&app).is_err());
    assert!(!dest.exists());
}

/// Fetcher that seeds an in-memory tree instead of touching disk.
struct SeedingFetcher {
    fs: MemoryFilesystem,
}

impl TemplateFetcher for SeedingFetcher {
    fn fetch(&self, _source: &str, into: &Path) -> AppforgeResult<()> {
        let pkg = into.join("src/fastapi_template_project");
        self.fs.seed_file(into.join("pyproject.toml"), PYPROJECT);
        self.fs.seed_file(into.join("setup.py"), SETUP_PY);
        self.fs.seed_file(into.join("README.md"), README);
        self.fs.seed_file(into.join("run_dev.py"), "fastapi_template_project\n");
        self.fs.seed_file(into.join("entry_point.sh"), "fastapi_template_project\n");
        self.fs.seed_file(into.join(".git/HEAD"), "ref\n");
        self.fs.seed_file(pkg.join("__init__.py"), "");
        self.fs.seed_file(pkg.join("app.py"), APP_PY);
        self.fs.seed_file(
            into.join("tests/test_app.py"),
            "import fastapi_template_project\n",
        );
        Ok(())
    }
}

#[test]
fn memory_filesystem_end_to_end() {
    let fs = MemoryFilesystem::new();
    let service = CreateAppService::new(
        TemplateProfile::default(),
        Box::new(SeedingFetcher { fs: fs.clone() }),
        Box::new(fs.clone()),
        Box::new(PermissionBitMarker::new(fs.clone())),
    );

    let dest = PathBuf::from("/virtual/out/myapp");
    let report = service.create(&myapp(dest.clone())).unwrap();

    assert!(fs.is_file(&dest.join("src/myapp/app.py")));
    assert!(!fs.exists(&dest.join(".git")));
    assert!(fs.is_executable(&dest.join("entry_point.sh")));
    assert_eq!(
        fs.read_file(&dest.join("tests/test_app.py")).as_deref(),
        Some("import myapp\n")
    );
    assert!(report.copied.contains(&PathBuf::from("src")));
    assert!(report.lines_rewritten > 0);
}
