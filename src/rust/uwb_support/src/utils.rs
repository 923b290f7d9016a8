// Copyright 2022, The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

macro_rules! builder_field {
    ($field:ident, $ty:ty, $wrap:expr) => {
        /// Set the $field field.
        pub fn $field(&mut self, value: $ty) -> &mut Self {
            self.$field = $wrap(value);
            self
        }
    };
    ($field:ident, $ty:ty) => {
        builder_field!($field, $ty, ::std::convert::identity);
    };
}
pub(crate) use builder_field;

macro_rules! flag_builder_field {
    ($field:ident, $flag:ty) => {
        /// Add the flags to the $field field.
        pub fn $field(&mut self, flags: impl IntoIterator<Item = $flag>) -> &mut Self {
            self.$field.extend(flags);
            self
        }
    };
}
pub(crate) use flag_builder_field;

macro_rules! getter_field {
    ($field:ident, $ty:ty) => {
        pub fn $field(&self) -> &$ty {
            &self.$field
        }
    };
}
pub(crate) use getter_field;

#[cfg(test)]
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
mod tests {
    struct Foo {
        value: u32,
    }

    impl Foo {
        pub fn new(value: u32) -> Self {
            Self { value }
        }

        getter_field!(value, u32);
    }

    #[derive(Default)]
    struct FooBuilder {
        value: u32,
        name: Option<String>,
        tags: Vec<u8>,
    }

    impl FooBuilder {
        builder_field!(value, u32);
        builder_field!(name, String, Some);
        flag_builder_field!(tags, u8);
    }

    #[test]
    fn test_getter_field() {
        let foo = Foo::new(5);
        assert_eq!(foo.value(), &5);
    }

    #[test]
    fn test_builder_field() {
        let mut builder = FooBuilder::default();
        builder.value(7).name("foo".to_string());
        assert_eq!(builder.value, 7);
        assert_eq!(builder.name, Some("foo".to_string()));
    }

    #[test]
    fn test_flag_builder_field() {
        let mut builder = FooBuilder::default();
        builder.tags([1, 2]).tags([3]);
        assert_eq!(builder.tags, vec![1, 2, 3]);
    }
}
