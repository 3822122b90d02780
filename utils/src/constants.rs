// Paths
pub const RECIPE_FILE: &str = "docker.yml";
pub const DEFAULT_DOCKERFILE: &str = "Dockerfile";
pub const DEFAULT_BUILD_DIR: &str = "build";
pub const DOCKER_BUILD_DIR: &str = "docker";
pub const DEFAULT_COMPOSE_TEMPLATE: &str = "docker-compose.yml.template";
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";
pub const DOCKERFILE_ZIP: &str = "Dockerfile.zip";

// Programs
pub const DOCKER: &str = "docker";

// Labels
pub const LABEL_KEY_PATTERN: &str = "^[a-z0-9.-]*$";

// Task names
pub const TASK_GROUP: &str = "Docker";
pub const CLEAN_TASK: &str = "dockerClean";
pub const PREPARE_TASK: &str = "dockerPrepare";
pub const BUILD_TASK: &str = "docker";
pub const TAG_TASK: &str = "dockerTag";
pub const TAGS_PUSH_TASK: &str = "dockerTagsPush";
pub const PUSH_TASK: &str = "dockerPush";
pub const DOCKERFILE_ZIP_TASK: &str = "dockerfileZip";

// Dockwright vars
pub const DW_RECIPE: &str = "DW_RECIPE";
pub const DW_PROJECT_DIR: &str = "DW_PROJECT_DIR";
pub const DW_BUILD_DIR: &str = "DW_BUILD_DIR";
